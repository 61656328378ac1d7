//! Identifier newtypes with smart constructors.
//!
//! Identifiers validate non-empty strings at construction time, including
//! when they arrive through serde.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unique identifier of a flow record (e.g. "f3").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Smart constructor: validates non-empty record ID
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidRecordId> {
        let s = raw.into();
        if s.is_empty() {
            Err(InvalidRecordId::Empty)
        } else {
            Ok(Self(s))
        }
    }

    /// The raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RecordId {
    type Error = InvalidRecordId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

/// Identifier of an actor node in the network graph (e.g. "Processor").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(String);

impl NodeId {
    /// Smart constructor: validates non-empty node ID
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidNodeId> {
        let s = raw.into();
        if s.is_empty() {
            Err(InvalidNodeId::Empty)
        } else {
            Ok(Self(s))
        }
    }

    /// The raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for NodeId {
    type Error = InvalidNodeId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

// ===== Error Types =====

/// Rejected [`RecordId`] input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRecordId {
    /// The id was the empty string.
    #[error("Record ID cannot be empty")]
    Empty,
}

/// Rejected [`NodeId`] input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidNodeId {
    /// The id was the empty string.
    #[error("Node ID cannot be empty")]
    Empty,
}
