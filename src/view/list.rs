//! List view: one table row per filtered record.

use super::constants::ABSENT_FIELD;
use super::layout::RenderContext;
use super::render_empty_state;
use crate::model::FlowRecord;
use crate::view_state::{offset_for_cursor, HitMap, HitTarget};
use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

/// Table header, left to right.
pub const COLUMN_TITLES: [&str; 6] = ["Stage", "Company", "Date", "From", "To", "Tags"];

const HIGHLIGHT_SYMBOL: &str = "▶ ";

fn or_absent(value: Option<&String>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.clone(),
        _ => ABSENT_FIELD.to_string(),
    }
}

/// Cell texts of one row, in [`COLUMN_TITLES`] order.
pub fn row_cells(record: &FlowRecord) -> [String; 6] {
    [
        record.stage.clone(),
        record.company.clone().unwrap_or_default(),
        record.date.clone().unwrap_or_default(),
        or_absent(record.from.as_ref()),
        or_absent(record.to.as_ref()),
        record.tags().join(", "),
    ]
}

/// Render the records table.
pub fn render_list(frame: &mut Frame, area: Rect, ctx: &RenderContext<'_>, hits: &mut HitMap) {
    let records = ctx.state.filtered(ctx.store);
    if records.is_empty() {
        render_empty_state(frame, area, ctx.styles);
        return;
    }

    let styles = ctx.styles;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles.border);
    let inner = block.inner(area);

    // Header takes one line; the rest holds rows
    let visible_rows = inner.height.saturating_sub(1) as usize;
    let cursor = ctx.state.cursor();
    let offset = offset_for_cursor(cursor, visible_rows, records.len());
    let selected = ctx.state.selected();

    let header = Row::new(
        COLUMN_TITLES
            .iter()
            .map(|t| Cell::from(Span::styled(*t, styles.section_header))),
    );

    let rows = records.iter().map(|record| {
        let row = Row::new(row_cells(record).map(Cell::from));
        if selected == Some(&record.id) {
            row.style(styles.selected)
        } else {
            row
        }
    });

    let widths = [
        Constraint::Length(11),
        Constraint::Fill(3),
        Constraint::Length(10),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Fill(2),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(styles.highlight)
        .highlight_symbol(HIGHLIGHT_SYMBOL);

    let mut table_state = TableState::default()
        .with_offset(offset)
        .with_selected(Some(cursor));
    frame.render_stateful_widget(table, area, &mut table_state);

    let first_row_y = inner.y + 1;
    for (line, (index, record)) in records
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows)
        .enumerate()
    {
        hits.push(
            Rect::new(inner.x, first_row_y + line as u16, inner.width, 1),
            HitTarget::Record {
                index,
                id: record.id.clone(),
            },
        );
    }
}
