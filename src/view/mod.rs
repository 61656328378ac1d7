//! TUI rendering and terminal management (impure shell)

pub mod constants;
pub mod detail;
pub mod flow;
pub mod graph;
mod help;
mod layout;
pub mod list;
pub mod search;
mod styles;
pub mod tabs;

pub use help::render_help_overlay;
pub use layout::{render_frame, RenderContext, NEW_SEARCH_LABEL};
pub use styles::{ColorConfig, ViewStyles};

use crate::config::keybindings::KeyBindings;
use crate::model::{AppError, KeyAction, ViewTab};
use crate::state::{Action, AppState, QueryResetPolicy, Screen};
use crate::store::RecordStore;
use crate::view_state::{GraphLayout, HitMap, HitTarget, LayoutKind};
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Rect},
    text::Span,
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::{debug, warn};

/// Text shown when a view has nothing to draw.
pub const EMPTY_STATE_TEXT: &str = "No matching records";

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    store: RecordStore,
    graph_layout: Box<dyn GraphLayout>,
    key_bindings: KeyBindings,
    styles: ViewStyles,
    subtitle: String,
    /// Click targets registered by the last drawn frame
    hit_map: HitMap,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture
    pub fn new(store: RecordStore, args: CliArgs) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self::with_terminal(terminal, store, args))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Blocks on terminal events;
    /// nothing is redrawn while idle.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if self.handle_event(event::read()?) {
                return Ok(());
            }
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Route one terminal event. Returns `true` when the app should quit.
    ///
    /// Only key presses count: terminals that report key releases or
    /// repeats would otherwise apply every keystroke twice.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                false
            }
            Event::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                false
            }
            _ => false,
        }
    }

    /// Build the application around an existing terminal.
    ///
    /// Used by `new` with the real terminal and by tests with `TestBackend`.
    pub fn with_terminal(terminal: Terminal<B>, store: RecordStore, args: CliArgs) -> Self {
        let graph_layout = args.layout.build(store.graph());

        let mut app_state = AppState::new(args.query_policy).with_tab(args.tab);
        if let Some(query) = &args.query {
            app_state = app_state.with_query(query.clone());
        }
        if args.start_on_results {
            app_state = app_state.on_results();
        }

        Self {
            terminal,
            app_state,
            store,
            graph_layout,
            key_bindings: KeyBindings::default(),
            styles: ViewStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color)),
            subtitle: args.subtitle,
            hit_map: HitMap::new(),
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Special case: Ctrl+C should always quit, even if not in bindings
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // Help overlay swallows everything except its own toggles and quit
        if self.app_state.help_visible() {
            match key.code {
                KeyCode::Esc | KeyCode::Char('?') => self.dispatch(Action::ToggleHelp),
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        match self.app_state.screen() {
            Screen::Search => {
                if let Some(action) = search_key_action(key) {
                    self.dispatch(action);
                }
                false
            }
            Screen::Results => {
                let Some(key_action) = self.key_bindings.get(key) else {
                    return false; // Unknown key, ignore
                };
                match self.results_action(key_action) {
                    Some(action) => {
                        self.dispatch(action);
                        false
                    }
                    None => key_action == KeyAction::Quit,
                }
            }
        }
    }

    /// Map a bound key on the results screen to a state action.
    ///
    /// Returns None for Quit, which is handled by the caller.
    fn results_action(&self, key_action: KeyAction) -> Option<Action> {
        let action = match key_action {
            KeyAction::SelectTab(tab) => Action::SetTab(tab),
            KeyAction::NextTab => Action::NextTab,
            KeyAction::PrevTab => Action::PrevTab,
            KeyAction::CursorUp => Action::CursorUp,
            KeyAction::CursorDown => Action::CursorDown,
            KeyAction::CursorHome => Action::CursorHome,
            KeyAction::CursorEnd => Action::CursorEnd,
            KeyAction::Activate => Action::ActivateCursor,
            KeyAction::CloseDetail => Action::CloseDetail,
            // Esc peels one layer: the panel first, then the results screen
            KeyAction::Dismiss => {
                if self.app_state.selected().is_some() {
                    Action::CloseDetail
                } else {
                    Action::Back
                }
            }
            KeyAction::Back => Action::Back,
            KeyAction::Help => Action::ToggleHelp,
            KeyAction::Quit => return None,
        };
        Some(action)
    }

    /// Handle a single mouse event
    ///
    /// Left clicks resolve against the regions registered by the last
    /// frame. The scroll wheel moves the highlight on the results screen.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.app_state.screen() != Screen::Results || self.app_state.help_visible() {
            return;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(target) = self.hit_map.target_at(mouse.column, mouse.row).cloned() else {
                    return;
                };
                debug!(?target, column = mouse.column, row = mouse.row, "click");
                match target {
                    HitTarget::Tab(tab) => self.dispatch(Action::SetTab(tab)),
                    HitTarget::Record { index, id } => {
                        self.dispatch(Action::CursorTo(index));
                        self.dispatch(Action::Select(Some(id)));
                    }
                    HitTarget::Node { index, id } => {
                        self.dispatch(Action::CursorTo(index));
                        self.dispatch(Action::SelectNode(id.to_string()));
                    }
                    HitTarget::CloseDetail => self.dispatch(Action::CloseDetail),
                    HitTarget::Back => self.dispatch(Action::Back),
                }
            }
            MouseEventKind::ScrollUp => self.dispatch(Action::CursorUp),
            MouseEventKind::ScrollDown => self.dispatch(Action::CursorDown),
            _ => {}
        }
    }

    fn dispatch(&mut self, action: Action) {
        debug!(?action, "dispatch");
        if let Action::SelectNode(node) = &action {
            if self.store.record_for_node(node).is_none() {
                warn!(node = %node, "node has no linked record");
            }
        }
        let state = std::mem::take(&mut self.app_state);
        self.app_state = state.apply(action, &self.store);
    }

    /// Render one frame and refresh the click targets.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let ctx = RenderContext {
            state: &self.app_state,
            store: &self.store,
            graph_layout: self.graph_layout.as_ref(),
            styles: &self.styles,
            subtitle: &self.subtitle,
        };
        let hits = &mut self.hit_map;
        hits.clear();

        self.terminal.draw(|frame| render_frame(frame, &ctx, hits))?;
        Ok(())
    }

    /// Current state.
    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Loaded records and graph.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Underlying terminal, for inspecting a test backend.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Translate a key on the search screen into a query edit.
///
/// Plain and shifted characters are typed; control and alt chords are
/// not, so Ctrl+U can clear the input.
fn search_key_action(key: KeyEvent) -> Option<Action> {
    let chord = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    let action = match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::ClearQuery,
        KeyCode::Char(ch) if !chord => Action::InsertChar(ch),
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::Delete,
        KeyCode::Left => Action::QueryCursorLeft,
        KeyCode::Right => Action::QueryCursorRight,
        KeyCode::Home => Action::QueryCursorHome,
        KeyCode::End => Action::QueryCursorEnd,
        KeyCode::Enter => Action::Submit,
        _ => return None,
    };
    Some(action)
}

/// Centered placeholder for views with nothing to show.
pub(crate) fn render_empty_state(frame: &mut Frame, area: Rect, styles: &ViewStyles) {
    if area.height == 0 {
        return;
    }
    let line_area = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    frame.render_widget(
        Paragraph::new(Span::styled(EMPTY_STATE_TEXT, styles.muted)).alignment(Alignment::Center),
        line_area,
    );
}

/// CLI arguments for TUI initialization
///
/// Carries the resolved command line and configuration into the TUI's
/// initial state. Parsing happens in main.rs.
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Initial query text.
    pub query: Option<String>,
    /// Skip the search screen and open results immediately.
    pub start_on_results: bool,
    /// Tab shown first on the results screen.
    pub tab: ViewTab,
    /// Node placement for the graph view.
    pub layout: LayoutKind,
    /// What happens to the query on `Back`.
    pub query_policy: QueryResetPolicy,
    /// Disable colours regardless of `NO_COLOR`.
    pub no_color: bool,
    /// Second header line, usually the dataset origin.
    pub subtitle: String,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            query: None,
            start_on_results: false,
            tab: ViewTab::Flow,
            layout: LayoutKind::default(),
            query_policy: QueryResetPolicy::default(),
            no_color: false,
            subtitle: String::new(),
        }
    }
}

/// Initialize and run the TUI application over a loaded store
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_store(store: RecordStore, args: CliArgs) -> Result<(), TuiError> {
    let mut app = TuiApp::new(store, args)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Rendered buffer as text: one line per row, trailing blanks and empty
/// rows dropped.
#[cfg(test)]
pub(crate) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordId;
    use crossterm::event::KeyEventState;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    // Helper to create test TuiApp
    fn create_test_app(args: CliArgs) -> TuiApp<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        TuiApp::with_terminal(terminal, RecordStore::builtin(), args)
    }

    fn type_text(app: &mut TuiApp<TestBackend>, text: &str) {
        for ch in text.chars() {
            assert!(!app.handle_key(key(KeyCode::Char(ch))));
        }
    }

    fn results_app() -> TuiApp<TestBackend> {
        create_test_app(CliArgs {
            start_on_results: true,
            ..CliArgs::default()
        })
    }

    #[test]
    fn tui_error_from_io_error() {
        let io_err = io::Error::other("test error");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
    }

    #[test]
    fn handle_key_ctrl_c_returns_true_on_both_screens() {
        let mut app = create_test_app(CliArgs::default());
        assert!(app.handle_key(ctrl('c')));
        let mut app = results_app();
        assert!(app.handle_key(ctrl('c')));
    }

    #[test]
    fn q_is_typed_on_search_but_quits_on_results() {
        let mut app = create_test_app(CliArgs::default());
        assert!(!app.handle_key(key(KeyCode::Char('q'))));
        assert_eq!(app.app_state().query(), "q");

        let mut app = results_app();
        assert!(app.handle_key(key(KeyCode::Char('q'))));
    }

    #[test]
    fn typing_and_enter_opens_results() {
        let mut app = create_test_app(CliArgs::default());
        type_text(&mut app, "Hilton");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.app_state().screen(), Screen::Results);
        assert_eq!(app.app_state().query(), "Hilton");
        assert_eq!(app.app_state().filtered(app.store()).len(), 1);
    }

    #[test]
    fn shifted_characters_are_typed() {
        let mut app = create_test_app(CliArgs::default());
        app.handle_key(KeyEvent::new(KeyCode::Char('M'), KeyModifiers::SHIFT));
        assert_eq!(app.app_state().query(), "M");
    }

    #[test]
    fn ctrl_u_clears_query() {
        let mut app = create_test_app(CliArgs::default());
        type_text(&mut app, "abc");
        app.handle_key(ctrl('u'));
        assert_eq!(app.app_state().query(), "");
    }

    #[test]
    fn esc_does_nothing_on_search() {
        let mut app = create_test_app(CliArgs::default());
        type_text(&mut app, "abc");
        assert!(!app.handle_key(key(KeyCode::Esc)));
        assert_eq!(app.app_state().screen(), Screen::Search);
        assert_eq!(app.app_state().query(), "abc");
    }

    #[test]
    fn esc_closes_detail_then_goes_back() {
        let mut app = results_app();
        app.handle_key(key(KeyCode::Enter));
        assert!(app.app_state().selected().is_some());

        app.handle_key(key(KeyCode::Esc));
        assert!(app.app_state().selected().is_none());
        assert_eq!(app.app_state().screen(), Screen::Results);

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.app_state().screen(), Screen::Search);
    }

    #[test]
    fn number_keys_switch_tabs() {
        let mut app = results_app();
        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(app.app_state().active_tab(), ViewTab::Graph);
        app.handle_key(key(KeyCode::Char('3')));
        assert_eq!(app.app_state().active_tab(), ViewTab::List);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.app_state().active_tab(), ViewTab::Flow);
    }

    #[test]
    fn help_overlay_swallows_keys_until_dismissed() {
        let mut app = results_app();
        app.handle_key(key(KeyCode::Char('?')));
        assert!(app.app_state().help_visible());

        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(app.app_state().active_tab(), ViewTab::Flow);

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.app_state().help_visible());
        assert_eq!(app.app_state().screen(), Screen::Results);
    }

    #[test]
    fn question_mark_is_typed_on_search() {
        let mut app = create_test_app(CliArgs::default());
        app.handle_key(key(KeyCode::Char('?')));
        assert!(!app.app_state().help_visible());
        assert_eq!(app.app_state().query(), "?");
    }

    #[test]
    fn draw_renders_without_error() {
        let mut app = results_app();
        app.draw().unwrap();
        let text = buffer_to_string(app.terminal().backend().buffer());
        assert!(text.contains("Agri Supply Chain"));
    }

    #[test]
    fn clicking_a_tab_switches_view() {
        let mut app = results_app();
        app.draw().unwrap();
        // header (3) + results bar (1): tab bar on row 4; " 2 Graph " starts at column 9
        app.handle_mouse(click(11, 4));
        assert_eq!(app.app_state().active_tab(), ViewTab::Graph);
    }

    #[test]
    fn clicking_a_list_row_selects_the_record() {
        let mut app = create_test_app(CliArgs {
            start_on_results: true,
            tab: ViewTab::List,
            ..CliArgs::default()
        });
        app.draw().unwrap();
        // content starts on row 5: border, header, then f1, f2, f3
        app.handle_mouse(click(10, 9));
        assert_eq!(app.app_state().selected(), Some(&RecordId::new("f3").unwrap()));
        assert_eq!(app.app_state().cursor(), 2);
    }

    #[test]
    fn clicks_are_ignored_before_first_draw() {
        let mut app = results_app();
        app.handle_mouse(click(11, 4));
        assert_eq!(app.app_state().active_tab(), ViewTab::Flow);
    }

    #[test]
    fn scroll_wheel_moves_highlight() {
        let mut app = results_app();
        let scroll = |kind| MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_mouse(scroll(MouseEventKind::ScrollDown));
        app.handle_mouse(scroll(MouseEventKind::ScrollDown));
        app.handle_mouse(scroll(MouseEventKind::ScrollUp));
        assert_eq!(app.app_state().cursor(), 1);
    }

    #[test]
    fn handle_event_ignores_key_releases() {
        let mut app = create_test_app(CliArgs {
            start_on_results: true,
            ..CliArgs::default()
        });
        let release = |code| {
            Event::Key(KeyEvent {
                code,
                modifiers: KeyModifiers::NONE,
                kind: KeyEventKind::Release,
                state: KeyEventState::NONE,
            })
        };

        assert!(!app.handle_event(release(KeyCode::Char('2'))));
        assert_eq!(app.app_state().active_tab(), ViewTab::Flow);
        assert!(!app.handle_event(release(KeyCode::Char('q'))));

        let press = Event::Key(KeyEvent::new(KeyCode::Char('2'), KeyModifiers::NONE));
        assert!(!app.handle_event(press));
        assert_eq!(app.app_state().active_tab(), ViewTab::Graph);
    }

    #[test]
    fn handle_event_quits_on_q_press_and_ignores_resize() {
        let mut app = create_test_app(CliArgs {
            start_on_results: true,
            ..CliArgs::default()
        });
        assert!(!app.handle_event(Event::Resize(80, 24)));
        assert!(!app.handle_event(Event::FocusGained));
        assert!(app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('q'),
            KeyModifiers::NONE
        ))));
    }

    #[test]
    fn cli_args_apply_initial_query_and_tab() {
        let app = create_test_app(CliArgs {
            query: Some("Woolworths".to_string()),
            start_on_results: true,
            tab: ViewTab::List,
            ..CliArgs::default()
        });
        assert_eq!(app.app_state().screen(), Screen::Results);
        assert_eq!(app.app_state().active_tab(), ViewTab::List);
        assert_eq!(app.app_state().filtered(app.store()).len(), 2);
    }

    #[test]
    fn empty_state_is_centred() {
        let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
        let styles = ViewStyles::with_color_config(ColorConfig::with_colors(false));
        terminal
            .draw(|frame| render_empty_state(frame, frame.area(), &styles))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let row: String = (0..40).map(|x| buffer[(x, 2)].symbol().to_string()).collect();
        assert_eq!(row.trim(), EMPTY_STATE_TEXT);
        assert!(row.starts_with("  "));
    }
}
