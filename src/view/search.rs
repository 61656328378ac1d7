//! Search screen: the query input card.

use super::constants::{SEARCH_CARD_MAX_WIDTH, SEARCH_INPUT_HEIGHT};
use super::layout::RenderContext;
use super::styles::ViewStyles;
use crate::state::QueryInput;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};

/// Heading of the search screen.
pub const SEARCH_TITLE: &str = "Search value chain";
/// Line under the heading.
pub const SEARCH_HINT: &str = "Type anything (company, PIC, stage, tag) and continue.";
/// Shown in the input while the query is empty.
pub const SEARCH_PLACEHOLDER: &str = "e.g. Hilton, NS123456, MSA, Woolworths";

/// Query input box.
///
/// Draws the text with a block cursor. An empty query shows the
/// placeholder; a stale query (about to be replaced by typing) is dimmed.
pub struct QueryInputBox<'a> {
    input: &'a QueryInput,
    stale: bool,
    styles: &'a ViewStyles,
}

impl<'a> QueryInputBox<'a> {
    /// Box over `input`; `stale` dims the text.
    pub fn new(input: &'a QueryInput, stale: bool, styles: &'a ViewStyles) -> Self {
        Self {
            input,
            stale,
            styles,
        }
    }

    fn line(&self) -> Line<'static> {
        let cursor_span = |text: String| Span::styled(text, self.styles.input_cursor);

        if self.input.is_empty() {
            return Line::from(vec![
                cursor_span(" ".to_string()),
                Span::styled(SEARCH_PLACEHOLDER, self.styles.placeholder),
            ]);
        }

        let text = self.input.as_str();
        let cursor = self.input.cursor();
        let before: String = text.chars().take(cursor).collect();
        let mut rest = text.chars().skip(cursor);
        let under = rest.next().map(String::from).unwrap_or_else(|| " ".to_string());
        let after: String = rest.collect();

        let text_style = if self.stale {
            self.styles.muted
        } else {
            ratatui::style::Style::default()
        };

        Line::from(vec![
            Span::styled(before, text_style),
            cursor_span(under),
            Span::styled(after, text_style),
        ])
    }
}

impl Widget for QueryInputBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.styles.focused_border);
        Paragraph::new(self.line()).block(block).render(area, buf);
    }
}

/// Render the search screen into the content area.
pub fn render_search_screen(frame: &mut Frame, area: Rect, ctx: &RenderContext<'_>) {
    let styles = ctx.styles;
    let state = ctx.state;

    let card_width = area.width.min(SEARCH_CARD_MAX_WIDTH);
    let card_height = (SEARCH_INPUT_HEIGHT + 7).min(area.height);
    let card = Rect::new(
        area.x + (area.width - card_width) / 2,
        area.y + (area.height - card_height) / 3,
        card_width,
        card_height,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles.border)
        .title(Span::styled(format!(" {} ", SEARCH_TITLE), styles.title));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // hint
            Constraint::Length(SEARCH_INPUT_HEIGHT),
            Constraint::Length(1), // match preview
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(SEARCH_HINT, styles.subtitle)).wrap(Wrap { trim: true }),
        rows[0],
    );

    frame.render_widget(
        QueryInputBox::new(state.query_input(), state.is_query_stale(), styles),
        rows[1],
    );

    let matches = state.filtered(ctx.store).len();
    let preview = Line::from(vec![
        Span::styled("Enter ↵", styles.key_hint),
        Span::styled(" Continue", styles.accent),
        Span::styled(
            format!("   {} matching record{}", matches, if matches == 1 { "" } else { "s" }),
            styles.muted,
        ),
    ]);
    frame.render_widget(Paragraph::new(preview), rows[2]);
}
