//! JSON dataset loading.
//!
//! A dataset file is the on-disk form of a [`RecordStore`]:
//!
//! ```json
//! {
//!   "records": [{ "id": "f1", "stage": "Farm", "tags": ["eNVD"] }],
//!   "graph": {
//!     "nodes": [{ "id": "FarmA", "label": "Farm A", "group": "Farm" }],
//!     "edges": [],
//!     "links": { "FarmA": "f1" }
//!   }
//! }
//! ```
//!
//! The file is read once at startup. An ingestion pipeline replacing the
//! demo data only has to emit this shape.

use super::RecordStore;
use crate::model::{DatasetError, FlowGraph, FlowRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Serialized dataset shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetFile {
    /// Flow records; ids must be unique.
    #[serde(default)]
    pub records: Vec<FlowRecord>,
    /// Network for the graph view; may be omitted.
    #[serde(default)]
    pub graph: FlowGraph,
}

impl DatasetFile {
    /// Validate into a store.
    pub fn into_store(self) -> Result<RecordStore, DatasetError> {
        RecordStore::new(self.records, self.graph)
    }
}

impl From<&RecordStore> for DatasetFile {
    fn from(store: &RecordStore) -> Self {
        Self {
            records: store.records().to_vec(),
            graph: store.graph().clone(),
        }
    }
}

/// Parse dataset JSON. `origin` is only used for error messages.
pub fn parse_dataset(contents: &str, origin: &Path) -> Result<RecordStore, DatasetError> {
    let file: DatasetFile =
        serde_json::from_str(contents).map_err(|e| DatasetError::Parse {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;
    file.into_store()
}

/// Load and validate a dataset file.
///
/// # Errors
///
/// Returns `DatasetError::Read` if the file cannot be read,
/// `DatasetError::Parse` for malformed JSON, and the structural
/// variants for invalid contents.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<RecordStore, DatasetError> {
    let path = path.as_ref();

    let contents = std::fs::read_to_string(path).map_err(|e| DatasetError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let store = parse_dataset(&contents, path)?;
    info!(
        path = %path.display(),
        records = store.len(),
        nodes = store.graph().nodes.len(),
        "Dataset loaded"
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn origin() -> PathBuf {
        PathBuf::from("test.json")
    }

    #[test]
    fn parse_minimal_dataset() {
        let json = r#"{
            "records": [
                {"id": "a", "stage": "Farm", "date": "2025-01-01"},
                {"id": "b", "stage": "Store", "metrics": {"posScans": 5, "wastePct": "2%"}}
            ],
            "graph": {
                "nodes": [{"id": "N1", "label": "One", "group": "Farm"}],
                "edges": [],
                "links": {"N1": "a"}
            }
        }"#;
        let store = parse_dataset(json, &origin()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.record_for_node("N1").unwrap().id.as_str(), "a");
    }

    #[test]
    fn graph_section_is_optional() {
        let store = parse_dataset(r#"{"records": []}"#, &origin()).unwrap();
        assert!(store.is_empty());
        assert!(store.graph().is_empty());
    }

    #[test]
    fn malformed_json_reports_parse_error_with_path() {
        let err = parse_dataset("{ not json", &origin()).unwrap_err();
        match err {
            DatasetError::Parse { path, .. } => assert_eq!(path, origin()),
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn empty_record_id_is_a_parse_error() {
        let err = parse_dataset(r#"{"records": [{"id": "", "stage": "Farm"}]}"#, &origin())
            .unwrap_err();
        assert!(matches!(err, DatasetError::Parse { .. }));
    }

    #[test]
    fn unknown_top_level_field_is_rejected() {
        let err = parse_dataset(r#"{"records": [], "extra": 1}"#, &origin()).unwrap_err();
        assert!(matches!(err, DatasetError::Parse { .. }));
    }

    #[test]
    fn missing_file_reports_read_error() {
        let err = load_dataset("/nonexistent/chainview/dataset.json").unwrap_err();
        assert!(matches!(err, DatasetError::Read { .. }));
    }

    #[test]
    fn builtin_store_survives_json_round_trip() {
        let store = RecordStore::builtin();
        let json = serde_json::to_string(&DatasetFile::from(&store)).unwrap();
        let reloaded = parse_dataset(&json, &origin()).unwrap();
        assert_eq!(reloaded, store);
    }
}
