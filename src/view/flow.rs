//! Flow view: one card per filtered record, in a responsive grid.

use super::constants::{FLOW_CARD_HEIGHT, FLOW_ONE_COLUMN_BELOW, FLOW_TWO_COLUMNS_BELOW};
use super::layout::RenderContext;
use super::styles::ViewStyles;
use super::render_empty_state;
use crate::model::FlowRecord;
use crate::view_state::{offset_for_cursor, HitMap, HitTarget};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Number of card columns for a content width.
pub fn column_count(width: u16) -> usize {
    if width < FLOW_ONE_COLUMN_BELOW {
        1
    } else if width < FLOW_TWO_COLUMNS_BELOW {
        2
    } else {
        3
    }
}

/// Card content lines: company, route, metrics, tags.
fn card_lines(record: &FlowRecord, styles: &ViewStyles) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(4);

    lines.push(Line::from(Span::styled(
        record.company.clone().unwrap_or_default(),
        styles.title,
    )));

    if record.has_route() {
        lines.push(Line::from(vec![
            Span::styled("From: ", styles.muted),
            Span::raw(record.from.clone().unwrap_or_else(|| "?".to_string())),
            Span::styled(" → To: ", styles.muted),
            Span::raw(record.to.clone().unwrap_or_else(|| "?".to_string())),
        ]));
    }

    if let Some(metrics) = record.metrics.as_ref().filter(|m| !m.is_empty()) {
        let summary = metrics
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join(" · ");
        lines.push(Line::from(Span::styled(summary, styles.subtitle)));
    }

    let mut chips = Vec::new();
    for tag in record.tags() {
        if !chips.is_empty() {
            chips.push(Span::raw(" "));
        }
        chips.push(Span::styled(format!("[{}]", tag), styles.chip));
    }
    if !chips.is_empty() {
        lines.push(Line::from(chips));
    }

    lines
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    record: &FlowRecord,
    highlighted: bool,
    selected: bool,
    styles: &ViewStyles,
) {
    let marker = if selected { "● " } else { "" };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!(" {} ", record.stage), styles.badge),
        ]))
        .border_style(if highlighted {
            styles.focused_border
        } else {
            styles.border
        });
    if let Some(date) = &record.date {
        block = block.title_top(
            Line::from(Span::styled(format!(" {} ", date), styles.muted)).right_aligned(),
        );
    }
    if highlighted {
        block = block.border_type(BorderType::Thick);
    }

    frame.render_widget(Paragraph::new(card_lines(record, styles)).block(block), area);
}

/// Render the flow grid.
///
/// Scrolls by whole card rows so that the highlighted card stays visible.
pub fn render_flow(frame: &mut Frame, area: Rect, ctx: &RenderContext<'_>, hits: &mut HitMap) {
    let records = ctx.state.filtered(ctx.store);
    if records.is_empty() {
        render_empty_state(frame, area, ctx.styles);
        return;
    }
    if area.width == 0 || area.height == 0 {
        return;
    }

    let columns = column_count(area.width);
    let card_width = area.width / columns as u16;
    let visible_rows = (area.height / FLOW_CARD_HEIGHT).max(1) as usize;
    let total_rows = records.len().div_ceil(columns);
    let cursor = ctx.state.cursor();
    let first_row = offset_for_cursor(cursor / columns, visible_rows, total_rows);

    let selected = ctx.state.selected();

    for (index, record) in records.iter().enumerate().skip(first_row * columns) {
        let row = index / columns - first_row;
        if row >= visible_rows {
            break;
        }
        let col = index % columns;
        let y = area.y + row as u16 * FLOW_CARD_HEIGHT;
        let height = FLOW_CARD_HEIGHT.min(area.y + area.height - y);
        let card = Rect::new(area.x + col as u16 * card_width, y, card_width, height);

        render_card(
            frame,
            card,
            record,
            index == cursor,
            selected == Some(&record.id),
            ctx.styles,
        );
        hits.push(
            card,
            HitTarget::Record {
                index,
                id: record.id.clone(),
            },
        );
    }
}
