//! Record store: the immutable dataset behind every view.
//!
//! This module provides the dataset sources:
//! - The built-in demo chain (farm to store)
//! - A JSON dataset file loaded once at startup
//!
//! Both produce the same [`RecordStore`] shape. Once built, a store is
//! never mutated; views and the state reducer borrow from it.

use crate::model::{DatasetError, FlowGraph, FlowRecord, GraphNode, NodeId, RecordId};
use std::collections::HashSet;
use tracing::warn;

pub mod builtin;
pub mod file;

pub use file::{load_dataset, DatasetFile};

/// Validated, immutable record set plus its graph description.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore {
    records: Vec<FlowRecord>,
    graph: FlowGraph,
}

impl RecordStore {
    /// Build a store, enforcing the structural invariants.
    ///
    /// # Errors
    ///
    /// - `DuplicateRecordId` / `DuplicateNodeId` when ids collide
    /// - `DanglingEdge` when an edge endpoint is not a node
    /// - `UnknownLinkTarget` when a node link names a missing node or record
    pub fn new(records: Vec<FlowRecord>, graph: FlowGraph) -> Result<Self, DatasetError> {
        let mut record_ids = HashSet::new();
        for record in &records {
            if !record_ids.insert(record.id.as_str()) {
                return Err(DatasetError::DuplicateRecordId {
                    id: record.id.to_string(),
                });
            }
            if let Some(date) = &record.date {
                if chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
                    warn!(record = %record.id, date = %date, "Record date is not YYYY-MM-DD");
                }
            }
        }

        let mut node_ids = HashSet::new();
        for node in &graph.nodes {
            if !node_ids.insert(node.id.as_str()) {
                return Err(DatasetError::DuplicateNodeId {
                    id: node.id.to_string(),
                });
            }
        }

        for edge in &graph.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !node_ids.contains(endpoint.as_str()) {
                    return Err(DatasetError::DanglingEdge {
                        edge: edge.id.clone(),
                        node: endpoint.to_string(),
                    });
                }
            }
        }

        for (node, record) in graph.links.iter() {
            let missing = if !node_ids.contains(node) {
                Some("node")
            } else if !record_ids.contains(record.as_str()) {
                Some("record")
            } else {
                None
            };
            if let Some(missing) = missing {
                return Err(DatasetError::UnknownLinkTarget {
                    node: node.to_string(),
                    record: record.to_string(),
                    missing,
                });
            }
        }

        Ok(Self { records, graph })
    }

    /// Store with no records and no graph.
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            graph: FlowGraph::default(),
        }
    }

    /// The demo beef chain shipped with the viewer.
    pub fn builtin() -> Self {
        builtin::demo_store()
    }

    /// All records in dataset order.
    pub fn records(&self) -> &[FlowRecord] {
        &self.records
    }

    /// The network shown by the graph view.
    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record by id.
    pub fn record(&self, id: &RecordId) -> Option<&FlowRecord> {
        self.record_by_str(id.as_str())
    }

    /// Record by raw id text.
    pub fn record_by_str(&self, id: &str) -> Option<&FlowRecord> {
        self.records.iter().find(|r| r.id.as_str() == id)
    }

    /// Record linked to a graph node.
    ///
    /// Returns `None` for an unknown node or a node without a link; callers
    /// treat that as "nothing to select".
    pub fn record_for_node(&self, node_id: &str) -> Option<&FlowRecord> {
        self.graph
            .linked_record(node_id)
            .and_then(|id| self.record(id))
    }

    /// Graph node linked to a record, if any.
    pub fn node_for_record(&self, record_id: &RecordId) -> Option<&GraphNode> {
        self.graph
            .links
            .iter()
            .find(|(_, linked)| *linked == record_id)
            .and_then(|(node, _)| self.graph.node(node))
    }

    /// Node id at a position in graph declaration order.
    pub fn node_id_at(&self, index: usize) -> Option<&NodeId> {
        self.graph.nodes.get(index).map(|n| &n.id)
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GraphEdge, OrderedMap};

    fn rid(s: &str) -> RecordId {
        RecordId::new(s).unwrap()
    }

    fn nid(s: &str) -> NodeId {
        NodeId::new(s).unwrap()
    }

    #[test]
    fn builtin_store_has_six_records_in_chain_order() {
        let store = RecordStore::builtin();
        let ids: Vec<&str> = store.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["f1", "f2", "f3", "f4", "f5", "f6"]);
        assert_eq!(store.graph().nodes.len(), 6);
        assert_eq!(store.graph().edges.len(), 5);
    }

    #[test]
    fn record_for_node_resolves_processor_to_f3() {
        let store = RecordStore::builtin();
        let record = store.record_for_node("Processor").unwrap();
        assert_eq!(record.id.as_str(), "f3");
    }

    #[test]
    fn record_for_unknown_node_is_none() {
        let store = RecordStore::builtin();
        assert!(store.record_for_node("Warehouse").is_none());
    }

    #[test]
    fn node_for_record_is_reverse_of_link() {
        let store = RecordStore::builtin();
        let node = store.node_for_record(&rid("f4")).unwrap();
        assert_eq!(node.id.as_str(), "CaseReady");
    }

    #[test]
    fn duplicate_record_id_is_rejected() {
        let records = vec![
            FlowRecord::new(rid("a"), "Farm"),
            FlowRecord::new(rid("a"), "Store"),
        ];
        let err = RecordStore::new(records, FlowGraph::default()).unwrap_err();
        assert_eq!(err, DatasetError::DuplicateRecordId { id: "a".into() });
    }

    #[test]
    fn duplicate_node_id_is_rejected() {
        let graph = FlowGraph {
            nodes: vec![
                GraphNode::new(nid("Farm"), "Farm A", "Farm"),
                GraphNode::new(nid("Farm"), "Farm B", "Farm"),
            ],
            edges: Vec::new(),
            links: OrderedMap::new(),
        };
        let err = RecordStore::new(Vec::new(), graph).unwrap_err();
        assert_eq!(err, DatasetError::DuplicateNodeId { id: "Farm".into() });
    }

    #[test]
    fn dangling_edge_is_rejected() {
        let graph = FlowGraph {
            nodes: vec![GraphNode::new(nid("A"), "A", "Farm")],
            edges: vec![GraphEdge::new("e1", nid("A"), nid("B"))],
            links: OrderedMap::new(),
        };
        let err = RecordStore::new(Vec::new(), graph).unwrap_err();
        assert_eq!(
            err,
            DatasetError::DanglingEdge {
                edge: "e1".into(),
                node: "B".into()
            }
        );
    }

    #[test]
    fn link_to_missing_record_is_rejected() {
        let mut links = OrderedMap::new();
        links.insert("A", rid("f1"));
        let graph = FlowGraph {
            nodes: vec![GraphNode::new(nid("A"), "A", "Farm")],
            edges: Vec::new(),
            links,
        };
        let err = RecordStore::new(Vec::new(), graph).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::UnknownLinkTarget {
                missing: "record",
                ..
            }
        ));
    }

    #[test]
    fn link_from_missing_node_is_rejected() {
        let mut links = OrderedMap::new();
        links.insert("Ghost", rid("f1"));
        let graph = FlowGraph {
            nodes: vec![GraphNode::new(nid("A"), "A", "Farm")],
            edges: Vec::new(),
            links,
        };
        let records = vec![FlowRecord::new(rid("f1"), "Farm")];
        let err = RecordStore::new(records, graph).unwrap_err();
        assert_eq!(
            err,
            DatasetError::UnknownLinkTarget {
                node: "Ghost".into(),
                record: "f1".into(),
                missing: "node",
            }
        );
    }

    #[test]
    fn empty_store_has_no_records_or_nodes() {
        let store = RecordStore::empty();
        assert!(store.is_empty());
        assert!(store.graph().is_empty());
        assert!(store.record_for_node("Processor").is_none());
    }
}
