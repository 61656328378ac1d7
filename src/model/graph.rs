//! Network description shown by the graph view.
//!
//! The graph is a companion to the record list: nodes are stage-level
//! actors, edges are directed hand-offs, and `links` maps a node to the
//! flow record opened when the node is selected.

use super::identifiers::{NodeId, RecordId};
use super::ordered_map::OrderedMap;
use serde::{Deserialize, Serialize};

/// Two-character escape used by authored datasets to break a label.
const LITERAL_LINE_BREAK: &str = "\\n";

/// A stage-level actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique within the graph; referenced by edges and links.
    pub id: NodeId,
    /// Display text. May contain a line-break marker (`\n` or the literal `\\n`).
    pub label: String,
    /// Stage category, e.g. "Case-Ready".
    pub group: String,
}

impl GraphNode {
    /// Create a node.
    pub fn new(id: NodeId, label: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            group: group.into(),
        }
    }

    /// Label split at every line-break marker.
    pub fn label_lines(&self) -> Vec<&str> {
        self.label
            .split('\n')
            .flat_map(|part| part.split(LITERAL_LINE_BREAK))
            .collect()
    }
}

/// Directed relation between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Edge identifier as authored.
    pub id: String,
    /// Node the hand-off starts from.
    pub source: NodeId,
    /// Node the hand-off ends at.
    pub target: NodeId,
    /// Transport or hand-off description drawn at the edge midpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl GraphEdge {
    /// Create an unlabelled edge.
    pub fn new(id: impl Into<String>, source: NodeId, target: NodeId) -> Self {
        Self {
            id: id.into(),
            source,
            target,
            label: None,
        }
    }

    /// Set the edge label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Nodes, edges and the node → record links.
///
/// Structural invariants (edge endpoints exist, links resolve) are checked
/// by `RecordStore::new`, not here, so an unvalidated graph can still be
/// deserialized and reported on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowGraph {
    /// Nodes in declaration order.
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    /// Edges in declaration order.
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
    /// Node id → record opened when the node is selected.
    #[serde(default)]
    pub links: OrderedMap<RecordId>,
}

impl FlowGraph {
    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    /// Position of a node in declaration order.
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id.as_str() == id)
    }

    /// Record linked to a node, if the node is mapped.
    pub fn linked_record(&self, node_id: &str) -> Option<&RecordId> {
        self.links.get(node_id)
    }

    /// Edges leaving `node_id`, in declaration order.
    pub fn outgoing<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.source.as_str() == node_id)
    }

    /// Whether any edge points at `node_id`.
    pub fn has_incoming(&self, node_id: &str) -> bool {
        self.edges.iter().any(|e| e.target.as_str() == node_id)
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
