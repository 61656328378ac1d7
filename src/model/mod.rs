//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod graph;
pub mod identifiers;
pub mod key_action;
pub mod ordered_map;
pub mod record;
pub mod view_tab;

// Re-export for convenience
pub use error::{AppError, DatasetError};
pub use graph::{FlowGraph, GraphEdge, GraphNode};
pub use identifiers::{InvalidNodeId, InvalidRecordId, NodeId, RecordId};
pub use key_action::KeyAction;
pub use ordered_map::OrderedMap;
pub use record::{FlowRecord, MetricValue};
pub use view_tab::{UnknownViewTab, ViewTab};
