//! View tab bar.
//!
//! One line: ` 1 Flow │ 2 Graph │ 3 List `. The active tab is highlighted;
//! each title is a click target.

use super::styles::ViewStyles;
use crate::model::ViewTab;
use crate::view_state::{HitMap, HitTarget};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

const DIVIDER: &str = "│";

fn tab_label(tab: ViewTab) -> String {
    format!(" {} {} ", tab.index() + 1, tab.title())
}

/// Screen rectangle of every tab title, in display order.
///
/// Titles that do not fit in `area` are clipped or left out.
pub fn tab_regions(area: Rect) -> Vec<(Rect, ViewTab)> {
    let mut regions = Vec::with_capacity(ViewTab::ALL.len());
    let mut x = area.x;
    let right = area.x.saturating_add(area.width);

    for (i, tab) in ViewTab::ALL.into_iter().enumerate() {
        if i > 0 {
            x = x.saturating_add(DIVIDER.width() as u16);
        }
        if x >= right {
            break;
        }
        let width = (tab_label(tab).width() as u16).min(right - x);
        regions.push((Rect::new(x, area.y, width, area.height.min(1)), tab));
        x = x.saturating_add(width);
    }

    regions
}

/// Render the tab bar and register tab click targets.
pub fn render_tab_bar(
    frame: &mut Frame,
    area: Rect,
    active: ViewTab,
    styles: &ViewStyles,
    hits: &mut HitMap,
) {
    let mut spans = Vec::new();
    for (i, tab) in ViewTab::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(DIVIDER, styles.border));
        }
        let style = if tab == active {
            styles.active_tab
        } else {
            styles.inactive_tab
        };
        spans.push(Span::styled(tab_label(tab), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    for (rect, tab) in tab_regions(area) {
        hits.push(rect, HitTarget::Tab(tab));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::buffer_to_string;
    use crate::view::styles::ColorConfig;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn regions_are_contiguous_with_single_column_dividers() {
        let regions = tab_regions(Rect::new(0, 5, 80, 1));
        assert_eq!(regions.len(), 3);
        // " 1 Flow " = 8 cells, divider, " 2 Graph " = 9 cells, divider, " 3 List "
        assert_eq!(regions[0], (Rect::new(0, 5, 8, 1), ViewTab::Flow));
        assert_eq!(regions[1], (Rect::new(9, 5, 9, 1), ViewTab::Graph));
        assert_eq!(regions[2], (Rect::new(19, 5, 8, 1), ViewTab::List));
    }

    #[test]
    fn regions_are_clipped_to_narrow_area() {
        let regions = tab_regions(Rect::new(0, 0, 12, 1));
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[1].0.width, 3);
    }

    #[test]
    fn tab_bar_shows_all_titles_and_registers_targets() {
        let mut terminal = Terminal::new(TestBackend::new(40, 1)).unwrap();
        let styles = ViewStyles::with_color_config(ColorConfig::with_colors(false));
        let mut hits = HitMap::new();

        terminal
            .draw(|frame| {
                render_tab_bar(frame, frame.area(), ViewTab::Graph, &styles, &mut hits);
            })
            .unwrap();

        let text = buffer_to_string(terminal.backend().buffer());
        assert!(text.contains("1 Flow"));
        assert!(text.contains("2 Graph"));
        assert!(text.contains("3 List"));
        assert_eq!(hits.target_at(10, 0), Some(&HitTarget::Tab(ViewTab::Graph)));
        assert_eq!(hits.target_at(8, 0), None, "divider is not a target");
    }
}
