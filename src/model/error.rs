//! Error types for chainview.
//!
//! The filtering and selection core has no failure modes. Errors only
//! arise at the edges: loading a dataset, reading configuration, and
//! driving the terminal.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from the application shell
//!   - [`DatasetError`] - Dataset file could not be read, parsed or validated
//!   - `std::io::Error` - Terminal/TUI rendering failures

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Dataset errors are fatal at startup: the viewer has nothing to show
/// without a valid record set. Terminal errors are fatal at any time.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to load or validate the dataset.
    #[error("Failed to load dataset: {0}")]
    Dataset(#[from] DatasetError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors raised while building a [`RecordStore`](crate::store::RecordStore).
///
/// Structural problems carry the offending identifiers so the message
/// points at the exact entry in the dataset file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// Two records share an id.
    ///
    /// ```
    /// use chainview::model::DatasetError;
    ///
    /// let err = DatasetError::DuplicateRecordId { id: "f3".to_string() };
    /// assert!(err.to_string().contains("'f3'"));
    /// ```
    #[error("Duplicate record id '{id}'")]
    DuplicateRecordId {
        /// The repeated record id.
        id: String,
    },

    /// Two graph nodes share an id.
    #[error("Duplicate graph node id '{id}'")]
    DuplicateNodeId {
        /// The repeated node id.
        id: String,
    },

    /// An edge references a node that does not exist.
    #[error("Edge '{edge}' references unknown node '{node}'")]
    DanglingEdge {
        /// Edge id as written in the dataset.
        edge: String,
        /// The missing endpoint.
        node: String,
    },

    /// A node link names a node or record that does not exist.
    #[error("Link '{node}' -> '{record}' does not resolve: unknown {missing}")]
    UnknownLinkTarget {
        /// Node id on the left of the link.
        node: String,
        /// Record id on the right of the link.
        record: String,
        /// Which side of the link is missing ("node" or "record").
        missing: &'static str,
    },

    /// Dataset file could not be read.
    #[error("Failed to read dataset at {path}: {reason}")]
    Read {
        /// Path as given on the command line or in config.
        path: PathBuf,
        /// Underlying I/O error message.
        reason: String,
    },

    /// Dataset file is not valid JSON for the expected shape.
    #[error("Invalid dataset JSON in {path}: {reason}")]
    Parse {
        /// Path as given on the command line or in config.
        path: PathBuf,
        /// serde_json error message, including line and column.
        reason: String,
    },
}
