//! Detail panel for the selected record.
//!
//! Drawn over the right-hand side of the results content. Everything
//! underneath the panel stops being clickable; the close control in the
//! title bar becomes the topmost target.

use super::constants::{ABSENT_FIELD, DETAIL_PANEL_MIN_WIDTH, DETAIL_PANEL_WIDTH_PERCENT};
use super::styles::ViewStyles;
use crate::model::FlowRecord;
use crate::view_state::{HitMap, HitTarget};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Clickable label on the panel's top border.
pub const CLOSE_LABEL: &str = "[x] Close";
/// Key hint on the panel's last line.
pub const CLOSE_HINT: &str = "x / Esc to close";

/// Panel rectangle inside `content`.
pub fn panel_area(content: Rect) -> Rect {
    let preferred = content.width * DETAIL_PANEL_WIDTH_PERCENT / 100;
    let width = preferred.max(DETAIL_PANEL_MIN_WIDTH).min(content.width);
    Rect::new(
        content.x + content.width - width,
        content.y,
        width,
        content.height,
    )
}

/// Rectangle of the close control on the panel's top border.
pub fn close_button_area(panel: Rect) -> Rect {
    let width = (CLOSE_LABEL.width() as u16).min(panel.width.saturating_sub(2));
    Rect::new(
        (panel.x + panel.width).saturating_sub(width + 1),
        panel.y,
        width,
        panel.height.min(1),
    )
}

fn key_value_line(key: &str, value: String, styles: &ViewStyles) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", key), styles.muted),
        Span::raw(value),
    ])
}

/// Content lines of the panel.
pub fn detail_lines(record: &FlowRecord, styles: &ViewStyles) -> Vec<Line<'static>> {
    let field = |value: &Option<String>| match value {
        Some(v) if !v.is_empty() => v.clone(),
        _ => ABSENT_FIELD.to_string(),
    };

    let mut lines = vec![
        key_value_line("Stage", record.stage.clone(), styles),
        key_value_line("Company", field(&record.company), styles),
        key_value_line("Date", field(&record.date), styles),
    ];

    if record.has_route() {
        lines.push(key_value_line("From", field(&record.from), styles));
        lines.push(key_value_line("To", field(&record.to), styles));
    }

    if let Some(metrics) = record.metrics.as_ref().filter(|m| !m.is_empty()) {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Metrics", styles.section_header)));
        for (key, value) in metrics.iter() {
            lines.push(key_value_line(&format!("  {}", key), value.to_string(), styles));
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("References", styles.section_header)));
    match record.refs.as_ref().filter(|r| !r.is_empty()) {
        Some(refs) => {
            for (key, value) in refs.iter() {
                lines.push(key_value_line(&format!("  {}", key), value.clone(), styles));
            }
        }
        None => lines.push(Line::from(Span::styled("  none", styles.muted))),
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Tags", styles.section_header)));
    if record.tags().is_empty() {
        lines.push(Line::from(Span::styled("  none", styles.muted)));
    } else {
        let mut chips = vec![Span::raw("  ")];
        for (i, tag) in record.tags().iter().enumerate() {
            if i > 0 {
                chips.push(Span::raw(" "));
            }
            chips.push(Span::styled(format!("[{}]", tag), styles.chip));
        }
        lines.push(Line::from(chips));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(CLOSE_HINT, styles.muted)));
    lines
}

/// Render the panel and register its click targets.
pub fn render_detail(
    frame: &mut Frame,
    content: Rect,
    record: &FlowRecord,
    styles: &ViewStyles,
    hits: &mut HitMap,
) {
    if content.width == 0 || content.height == 0 {
        return;
    }
    let panel = panel_area(content);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles.focused_border)
        .title(Span::styled(
            format!(" {} · {} ", record.stage, record.id),
            styles.title,
        ))
        .title_top(Line::from(Span::styled(CLOSE_LABEL, styles.key_hint)).right_aligned());

    frame.render_widget(Clear, panel);
    frame.render_widget(
        Paragraph::new(detail_lines(record, styles))
            .block(block)
            .wrap(Wrap { trim: false }),
        panel,
    );

    hits.occlude(panel);
    hits.push(close_button_area(panel), HitTarget::CloseDetail);
}
