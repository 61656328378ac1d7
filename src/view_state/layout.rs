//! Graph node coordinate assignment.
//!
//! Layout is isolated behind [`GraphLayout`] so the coordinate source can
//! change without touching rendering or selection. Coordinates are in an
//! abstract canvas space (origin top-left, y grows downward); the graph
//! widget scales them into terminal cells.

use crate::model::{FlowGraph, NodeId};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Horizontal distance between consecutive nodes in a computed chain.
pub const CHAIN_SPACING: f64 = 200.0;
/// Canvas x of the first node.
pub const CHAIN_ORIGIN_X: f64 = 60.0;
/// Canvas y of every node in a single-row chain.
pub const CHAIN_ROW_Y: f64 = 60.0;
/// Canvas height used by both built-in layouts.
pub const CANVAS_HEIGHT: f64 = 150.0;
/// Right margin added after the last node.
const CANVAS_RIGHT_MARGIN: f64 = 90.0;

/// A position in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal canvas coordinate, growing rightwards.
    pub x: f64,
    /// Vertical canvas coordinate, growing downwards.
    pub y: f64,
}

impl Point {
    /// A point at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Canvas extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Canvas width in layout units.
    pub width: f64,
    /// Canvas height in layout units.
    pub height: f64,
}

/// Source of node coordinates.
pub trait GraphLayout {
    /// Position of a node's centre, or `None` if the layout has no place for it.
    fn position(&self, node: &NodeId) -> Option<Point>;

    /// Canvas size the positions live in.
    fn extent(&self) -> Extent;
}

// ===== StaticLayout =====

/// Hand-authored coordinate table.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticLayout {
    positions: HashMap<NodeId, Point>,
    extent: Extent,
}

impl StaticLayout {
    /// Layout over an explicit table.
    pub fn new(positions: HashMap<NodeId, Point>, extent: Extent) -> Self {
        Self { positions, extent }
    }

    /// The fixed table for the built-in demo network.
    pub fn demo() -> Self {
        let table = [
            ("FarmA", 60.0),
            ("Transport", 260.0),
            ("Processor", 460.0),
            ("CaseReady", 660.0),
            ("DC", 860.0),
            ("Store", 1060.0),
        ];
        let positions = table
            .into_iter()
            .filter_map(|(id, x)| Some((NodeId::new(id).ok()?, Point::new(x, CHAIN_ROW_Y))))
            .collect();
        Self::new(
            positions,
            Extent {
                width: 1150.0,
                height: CANVAS_HEIGHT,
            },
        )
    }
}

impl GraphLayout for StaticLayout {
    fn position(&self, node: &NodeId) -> Option<Point> {
        self.positions.get(node).copied()
    }

    fn extent(&self) -> Extent {
        self.extent
    }
}

// ===== ChainLayout =====

/// Left-to-right chain computed from the edges.
///
/// Nodes without incoming edges come first, then their successors in
/// breadth-first order; nodes unreachable from any root follow in
/// declaration order. Every node gets a slot, so any graph is drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainLayout {
    order: Vec<NodeId>,
}

impl ChainLayout {
    /// Order the graph's nodes into a chain.
    pub fn compute(graph: &FlowGraph) -> Self {
        let mut order = Vec::with_capacity(graph.nodes.len());
        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&NodeId> = graph
            .nodes
            .iter()
            .filter(|n| !graph.has_incoming(n.id.as_str()))
            .map(|n| &n.id)
            .collect();

        while let Some(id) = queue.pop_front() {
            if !seen.insert(id.as_str()) {
                continue;
            }
            order.push(id.clone());
            queue.extend(graph.outgoing(id.as_str()).map(|e| &e.target));
        }

        // Cycles and islands without a root
        for node in &graph.nodes {
            if seen.insert(node.id.as_str()) {
                order.push(node.id.clone());
            }
        }

        Self { order }
    }

    /// Node ids left to right.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }
}

impl GraphLayout for ChainLayout {
    fn position(&self, node: &NodeId) -> Option<Point> {
        self.order
            .iter()
            .position(|id| id == node)
            .map(|slot| Point::new(CHAIN_ORIGIN_X + slot as f64 * CHAIN_SPACING, CHAIN_ROW_Y))
    }

    fn extent(&self) -> Extent {
        let slots = self.order.len().max(1) as f64;
        Extent {
            width: CHAIN_ORIGIN_X + (slots - 1.0) * CHAIN_SPACING + CANVAS_RIGHT_MARGIN,
            height: CANVAS_HEIGHT,
        }
    }
}

// ===== LayoutKind =====

/// Which layout the graph view uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutKind {
    /// The fixed coordinate table. A graph with any node the table does not
    /// know is laid out as a chain instead.
    #[default]
    Static,
    /// Always computed from the edges.
    Chain,
}

impl LayoutKind {
    /// Name used on the command line and in config.
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutKind::Static => "static",
            LayoutKind::Chain => "chain",
        }
    }

    /// Build the layout for a graph.
    ///
    /// `Static` only applies when the table places every node; a loaded
    /// dataset with different node ids gets a computed chain instead.
    pub fn build(self, graph: &FlowGraph) -> Box<dyn GraphLayout> {
        match self {
            LayoutKind::Static => {
                let table = StaticLayout::demo();
                if graph.nodes.iter().all(|n| table.position(&n.id).is_some()) {
                    Box::new(table)
                } else {
                    Box::new(ChainLayout::compute(graph))
                }
            }
            LayoutKind::Chain => Box::new(ChainLayout::compute(graph)),
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Config or env value that names no layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown layout '{0}': expected static or chain")]
pub struct UnknownLayout(pub String);

impl FromStr for LayoutKind {
    type Err = UnknownLayout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static" => Ok(LayoutKind::Static),
            "chain" => Ok(LayoutKind::Chain),
            _ => Err(UnknownLayout(s.to_string())),
        }
    }
}
