//! Screen composition.
//!
//! Splits the frame into header, content and status bar, then delegates to
//! the search screen or to the active results view. Widgets register their
//! clickable regions in the frame's [`HitMap`] as they draw.

use super::constants::{
    HEADER_HEIGHT, RESULTS_BAR_HEIGHT, STATUS_BAR_HEIGHT, TAB_BAR_HEIGHT,
};
use super::styles::ViewStyles;
use super::{detail, flow, graph, help, list, search, tabs};
use crate::model::ViewTab;
use crate::state::{AppState, Screen};
use crate::store::RecordStore;
use crate::view_state::{GraphLayout, HitMap, HitTarget};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Label of the back control in the results bar.
pub const NEW_SEARCH_LABEL: &str = "← New search";

/// Everything a frame is rendered from.
pub struct RenderContext<'a> {
    /// State being shown.
    pub state: &'a AppState,
    /// Records and graph.
    pub store: &'a RecordStore,
    /// Node positions for the graph view.
    pub graph_layout: &'a dyn GraphLayout,
    /// Resolved styles.
    pub styles: &'a ViewStyles,
    /// Second header line, e.g. the dataset origin.
    pub subtitle: &'a str,
}

/// Render a full frame.
pub fn render_frame(frame: &mut Frame, ctx: &RenderContext<'_>, hits: &mut HitMap) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], ctx);

    match ctx.state.screen() {
        Screen::Search => search::render_search_screen(frame, chunks[1], ctx),
        Screen::Results => render_results(frame, chunks[1], ctx, hits),
    }

    render_status_bar(frame, chunks[2], ctx);

    if ctx.state.screen() == Screen::Results && ctx.state.help_visible() {
        help::render_help_overlay(frame, ctx.styles, hits);
    }
}

fn render_header(frame: &mut Frame, area: Rect, ctx: &RenderContext<'_>) {
    let lines = vec![
        Line::from(Span::styled("Agri Supply Chain", ctx.styles.title)),
        Line::from(Span::styled(ctx.subtitle, ctx.styles.subtitle)),
    ];
    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ctx.styles.border),
    );
    frame.render_widget(header, area);
}

fn render_results(frame: &mut Frame, area: Rect, ctx: &RenderContext<'_>, hits: &mut HitMap) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(RESULTS_BAR_HEIGHT),
            Constraint::Length(TAB_BAR_HEIGHT),
            Constraint::Min(0),
        ])
        .split(area);

    render_results_bar(frame, chunks[0], ctx, hits);
    tabs::render_tab_bar(frame, chunks[1], ctx.state.active_tab(), ctx.styles, hits);

    let content = chunks[2];
    match ctx.state.active_tab() {
        ViewTab::Flow => flow::render_flow(frame, content, ctx, hits),
        ViewTab::Graph => graph::render_graph(frame, content, ctx, hits),
        ViewTab::List => list::render_list(frame, content, ctx, hits),
    }

    if let Some(record) = ctx.state.selected_record(ctx.store) {
        detail::render_detail(frame, content, record, ctx.styles, hits);
    }
}

/// Results bar: back control, current query and match count.
fn render_results_bar(frame: &mut Frame, area: Rect, ctx: &RenderContext<'_>, hits: &mut HitMap) {
    let query = ctx.state.query();
    let query_text = if query.is_empty() {
        "(all)".to_string()
    } else {
        query.to_string()
    };
    let shown = ctx.state.filtered(ctx.store).len();

    let line = Line::from(vec![
        Span::styled(NEW_SEARCH_LABEL, ctx.styles.accent),
        Span::raw("   "),
        Span::styled("Query: ", ctx.styles.muted),
        Span::raw(query_text),
        Span::styled(
            format!("   {} of {} records", shown, ctx.store.len()),
            ctx.styles.muted,
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    let back_width = (NEW_SEARCH_LABEL.width() as u16).min(area.width);
    hits.push(
        Rect::new(area.x, area.y, back_width, area.height.min(1)),
        HitTarget::Back,
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &RenderContext<'_>) {
    let hints: &[(&str, &str)] = match ctx.state.screen() {
        Screen::Search => &[
            ("Enter", "continue"),
            ("←/→", "move"),
            ("Ctrl+U", "clear"),
            ("Ctrl+C", "quit"),
        ],
        Screen::Results => &[
            ("1-3", "views"),
            ("j/k", "move"),
            ("Enter", "open"),
            ("Esc", "close"),
            ("b", "back"),
            ("?", "help"),
            ("q", "quit"),
        ],
    };

    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", ctx.styles.muted));
        }
        spans.push(Span::styled(*key, ctx.styles.key_hint));
        spans.push(Span::styled(format!(" {}", desc), ctx.styles.muted));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
