//! Graph view: the supply-chain network as boxes and arrows.
//!
//! Node coordinates come from a [`GraphLayout`] in canvas units and are
//! mapped onto terminal cells here. The full network is always drawn;
//! nodes whose linked record is filtered out by the query are dimmed.
//! When the terminal is too narrow for every box the view scrolls
//! horizontally to keep the highlighted node on screen.

use super::constants::{GRAPH_NODE_HEIGHT, GRAPH_NODE_MAX_WIDTH, GRAPH_NODE_MIN_WIDTH};
use super::layout::RenderContext;
use super::render_empty_state;
use super::styles::ViewStyles;
use crate::model::{FlowGraph, GraphEdge, GraphNode, RecordId};
use crate::view_state::{GraphLayout, HitMap, HitTarget};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use std::collections::HashSet;
use unicode_width::UnicodeWidthStr;

/// A node box that is fully visible in the drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodePlacement {
    /// Index into `FlowGraph::nodes`.
    pub index: usize,
    /// Cells covered by the box, borders included.
    pub rect: Rect,
}

/// Result of mapping the layout onto terminal cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphGeometry {
    /// Visible nodes in declaration order.
    pub placements: Vec<NodePlacement>,
    /// Cells between horizontally adjacent node centres.
    pub gap_cells: u16,
    /// Some nodes lie left of the visible window.
    pub clipped_left: bool,
    /// Some nodes lie right of the visible window.
    pub clipped_right: bool,
}

impl GraphGeometry {
    /// Box of a node, if it is visible.
    pub fn rect_of(&self, index: usize) -> Option<Rect> {
        self.placements
            .iter()
            .find(|p| p.index == index)
            .map(|p| p.rect)
    }
}

/// Map node positions onto `area`.
///
/// Box width shrinks with the available width down to
/// [`GRAPH_NODE_MIN_WIDTH`]; below that the virtual canvas is wider than
/// the area and the window is centred on node `focus`. Rows follow the
/// node's height within the layout's [`Extent`](crate::view_state::Extent).
/// One row under the boxes is kept free for edge labels.
pub fn place_nodes(
    graph: &FlowGraph,
    layout: &dyn GraphLayout,
    area: Rect,
    focus: usize,
) -> GraphGeometry {
    let positioned: Vec<(usize, f64, f64)> = graph
        .nodes
        .iter()
        .enumerate()
        .filter_map(|(i, n)| layout.position(&n.id).map(|p| (i, p.x, p.y)))
        .collect();

    if positioned.is_empty() || area.width == 0 || area.height < GRAPH_NODE_HEIGHT {
        return GraphGeometry::default();
    }

    let distinct = |values: Vec<f64>| {
        let mut values = values;
        values.sort_by(f64::total_cmp);
        values.dedup_by(|a, b| (*a - *b).abs() < f64::EPSILON);
        values
    };
    let xs = distinct(positioned.iter().map(|(_, x, _)| *x).collect());

    let min_x = xs[0];
    let span_x = xs[xs.len() - 1] - min_x;
    let min_gap = xs
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(f64::INFINITY, f64::min);

    let (gap_cells, node_width, scale) = if xs.len() < 2 {
        (0, GRAPH_NODE_MAX_WIDTH.min(area.width), 0.0)
    } else {
        let gaps = span_x / min_gap;
        let fit = ((f64::from(area.width) + 2.0) / (gaps + 1.0)).floor() as u16;
        let gap_cells = fit.max(GRAPH_NODE_MIN_WIDTH + 2);
        let node_width = (gap_cells - 2).clamp(GRAPH_NODE_MIN_WIDTH, GRAPH_NODE_MAX_WIDTH);
        (gap_cells, node_width, f64::from(gap_cells) / min_gap)
    };

    let left_of = |x: f64| ((x - min_x) * scale).round() as i32;
    let virtual_width = (span_x * scale).round() as i32 + i32::from(node_width);
    let area_width = i32::from(area.width);

    let offset = if virtual_width <= area_width {
        -((area_width - virtual_width) / 2)
    } else {
        let focus_left = positioned
            .iter()
            .find(|(i, _, _)| *i == focus)
            .map(|(_, x, _)| left_of(*x))
            .unwrap_or(0);
        let centre = focus_left + i32::from(node_width) / 2;
        (centre - area_width / 2).clamp(0, virtual_width - area_width)
    };

    let canvas_height = layout.extent().height;
    let usable_height = area.height.saturating_sub(GRAPH_NODE_HEIGHT + 1);
    let top_of = |y: f64| -> u16 {
        if canvas_height <= f64::EPSILON {
            usable_height / 2
        } else {
            ((y / canvas_height).clamp(0.0, 1.0) * f64::from(usable_height)).round() as u16
        }
    };

    let mut geometry = GraphGeometry {
        gap_cells,
        ..GraphGeometry::default()
    };

    for (index, x, y) in positioned {
        let left = left_of(x) - offset;
        if left < 0 {
            geometry.clipped_left = true;
            continue;
        }
        if left + i32::from(node_width) > area_width {
            geometry.clipped_right = true;
            continue;
        }
        let rect = Rect::new(
            area.x + left as u16,
            area.y + top_of(y),
            node_width,
            GRAPH_NODE_HEIGHT,
        );
        geometry.placements.push(NodePlacement { index, rect });
    }

    geometry
}

fn put(buf: &mut Buffer, area: Rect, x: u16, y: u16, symbol: &str, style: Style) {
    if area.contains(Position::new(x, y)) {
        buf[(x, y)].set_symbol(symbol).set_style(style);
    }
}

fn put_label(buf: &mut Buffer, area: Rect, centre: u16, y: u16, label: &str, max_width: u16, style: Style) {
    if max_width == 0 || y < area.y || y >= area.bottom() {
        return;
    }
    let width = (label.width() as u16).min(max_width);
    let x = centre
        .saturating_sub(width / 2)
        .clamp(area.x, area.right().saturating_sub(width));
    buf.set_stringn(x, y, label, usize::from(width), style);
}

/// Draw one edge between two placed boxes.
fn draw_edge(buf: &mut Buffer, area: Rect, from: Rect, to: Rect, edge: &GraphEdge, gap_cells: u16, styles: &ViewStyles) {
    let label = edge.label.as_deref().unwrap_or("");

    if from.y == to.y {
        let row = from.y + from.height / 2;
        let (start, end, arrow_at_end) = if from.right() <= to.x {
            (from.right(), to.x, true)
        } else if to.right() <= from.x {
            (to.right(), from.x, false)
        } else {
            return;
        };
        if start >= end {
            return;
        }
        for x in start..end {
            put(buf, area, x, row, "─", styles.edge);
        }
        if arrow_at_end {
            put(buf, area, end - 1, row, "▶", styles.edge);
        } else {
            put(buf, area, start, row, "◀", styles.edge);
        }
        let centre = start + (end - start) / 2;
        put_label(
            buf,
            area,
            centre,
            from.bottom(),
            label,
            gap_cells.saturating_sub(1),
            styles.edge_label,
        );
        return;
    }

    // Different rows: horizontal out of the source, then vertical into the target
    let row = from.y + from.height / 2;
    let column = to.x + to.width / 2;
    let going_right = column >= from.right();
    let (h_start, h_end) = if going_right {
        (from.right(), column)
    } else {
        (column + 1, from.x)
    };
    for x in h_start..h_end {
        put(buf, area, x, row, "─", styles.edge);
    }

    let going_down = to.y > row;
    let (v_start, v_end) = if going_down {
        (row + 1, to.y)
    } else {
        (to.bottom(), row)
    };
    let corner = match (going_right, going_down) {
        (true, true) => "┐",
        (false, true) => "┌",
        (true, false) => "┘",
        (false, false) => "└",
    };
    put(buf, area, column, row, corner, styles.edge);
    for y in v_start..v_end {
        put(buf, area, column, y, "│", styles.edge);
    }
    if going_down && v_end > v_start {
        put(buf, area, column, v_end - 1, "▼", styles.edge);
    } else if !going_down && v_end > v_start {
        put(buf, area, column, v_start, "▲", styles.edge);
    }
    let middle = v_start + v_end.saturating_sub(v_start) / 2;
    let label_width = (label.width() as u16).min(area.right().saturating_sub(column + 2));
    put_label(
        buf,
        area,
        column + 2 + label_width / 2,
        middle,
        label,
        label_width,
        styles.edge_label,
    );
}

fn render_node(
    frame: &mut Frame,
    rect: Rect,
    node: &GraphNode,
    highlighted: bool,
    selected: bool,
    dimmed: bool,
    styles: &ViewStyles,
) {
    let border_style = if dimmed {
        styles.dimmed
    } else if selected {
        styles.selected
    } else if highlighted {
        styles.focused_border
    } else {
        styles.group_style(&node.group)
    };
    let text_style = if dimmed {
        styles.dimmed
    } else if selected {
        styles.selected
    } else {
        Style::default()
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    if highlighted {
        block = block.border_type(BorderType::Thick);
    }
    if selected {
        block = block.title(Span::styled("●", styles.selected));
    }

    let lines: Vec<Line> = node
        .label_lines()
        .into_iter()
        .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
        .collect();

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        rect,
    );
}

/// Render the network.
pub fn render_graph(frame: &mut Frame, area: Rect, ctx: &RenderContext<'_>, hits: &mut HitMap) {
    let graph = ctx.store.graph();
    if graph.is_empty() {
        render_empty_state(frame, area, ctx.styles);
        return;
    }

    let styles = ctx.styles;
    let cursor = ctx.state.cursor();
    let geometry = place_nodes(graph, ctx.graph_layout, area, cursor);

    let matching: HashSet<&RecordId> = ctx
        .state
        .filtered(ctx.store)
        .into_iter()
        .map(|r| &r.id)
        .collect();
    let selected = ctx.state.selected();

    // Edges first so node boxes are drawn over any overlap
    {
        let buf = frame.buffer_mut();
        for edge in &graph.edges {
            let placed = |id: &str| {
                graph
                    .node_index(id)
                    .and_then(|i| geometry.rect_of(i))
            };
            if let (Some(from), Some(to)) = (placed(edge.source.as_str()), placed(edge.target.as_str())) {
                draw_edge(buf, area, from, to, edge, geometry.gap_cells, styles);
            }
        }
    }

    for placement in &geometry.placements {
        let node = &graph.nodes[placement.index];
        let linked = graph.linked_record(node.id.as_str());
        let dimmed = linked.is_some_and(|id| !matching.contains(id));
        let is_selected = linked.is_some() && linked == selected;

        render_node(
            frame,
            placement.rect,
            node,
            placement.index == cursor,
            is_selected,
            dimmed,
            styles,
        );
        hits.push(
            placement.rect,
            HitTarget::Node {
                index: placement.index,
                id: node.id.clone(),
            },
        );
    }

    let buf = frame.buffer_mut();
    let middle = area.y + area.height / 2;
    if geometry.clipped_left {
        put(buf, area, area.x, middle, "◀", styles.muted);
    }
    if geometry.clipped_right {
        put(buf, area, area.right().saturating_sub(1), middle, "▶", styles.muted);
    }
}
