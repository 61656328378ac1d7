//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with shortcuts grouped by screen.
//! Triggered by '?' on the results screen, dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::ViewStyles;
use crate::view_state::HitMap;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Overlay title.
pub const HELP_TITLE: &str = " Keyboard Shortcuts ";
/// Bottom border hint.
pub const DISMISS_HINT: &str = " Press Esc or ? to close ";

/// Shortcut table: section title followed by (keys, description) rows.
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Search Screen",
        &[
            ("type", "Edit the query"),
            ("←/→ Home/End", "Move the input cursor"),
            ("Ctrl+U", "Clear the query"),
            ("Enter", "Show matching records"),
        ],
    ),
    (
        "Results",
        &[
            ("1/f 2/g 3/l", "Flow, Graph or List view"),
            ("Tab/Shift+Tab", "Next or previous view"),
            ("j/↓ k/↑", "Move the highlight"),
            ("Home/End", "First or last item"),
            ("Enter/Space", "Open details of highlighted item"),
            ("x", "Close details"),
            ("Esc", "Close details, or back to search"),
            ("b/Backspace", "Back to search"),
        ],
    ),
    (
        "Mouse",
        &[
            ("click", "Select a card, row or node"),
            ("click tab", "Switch view"),
            ("wheel", "Move the highlight"),
        ],
    ),
    (
        "Application",
        &[("?", "Toggle this help"), ("q/Ctrl+C", "Quit")],
    ),
];

const KEY_COLUMN_WIDTH: usize = 16;

/// Render the help overlay centered on the screen.
///
/// The overlay covers whatever is underneath; nothing below it remains
/// clickable while it is shown.
pub fn render_help_overlay(frame: &mut Frame, styles: &ViewStyles, hits: &mut HitMap) {
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, frame.area());

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(styles))
        .block(
            Block::default()
                .title(Span::styled(HELP_TITLE, styles.title))
                .borders(Borders::ALL)
                .border_style(styles.focused_border),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);
    frame.render_widget(help_paragraph, popup_area);

    // Dismissal hint on the bottom border
    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: popup_area.height.min(1),
    };
    let hint = Paragraph::new(Line::from(Span::styled(DISMISS_HINT, styles.muted)))
        .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);

    hits.occlude(popup_area);
}

/// Calculate the centered rect for the help overlay.
///
/// Returns a Rect that is centered on the screen with the specified
/// percentage of width and height.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

/// Build the help content lines grouped by section.
fn build_help_content(styles: &ViewStyles) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, (title, rows)) in SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*title, styles.section_header)));
        for (keys, description) in rows.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<width$}", keys, width = KEY_COLUMN_WIDTH), styles.key_hint),
                Span::raw(*description),
            ]));
        }
    }
    lines
}

// ===== Tests =====

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
