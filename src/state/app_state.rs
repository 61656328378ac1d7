//! Application state and transitions.
//!
//! AppState is the root state type containing all UI state. It is an
//! immutable value: every transition goes through [`AppState::apply`],
//! which takes the previous state and an [`Action`] and returns the next
//! state (Elm-style reducer). The record store is passed in read-only so
//! selections can be validated against it.

use super::filter::filter;
use super::query_input::{self, QueryInput};
use crate::model::{FlowRecord, RecordId, ViewTab};
use crate::store::RecordStore;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ===== Screen =====

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Query entry.
    #[default]
    Search,
    /// Filtered records in the active view, with the detail panel.
    Results,
}

// ===== QueryResetPolicy =====

/// What happens to the query text when going back to the search screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryResetPolicy {
    /// Keep the query verbatim.
    #[default]
    Keep,
    /// Empty the query on `Results → Search`.
    ClearOnBack,
    /// Keep and show the query, but the first character typed replaces it.
    ReplaceOnType,
}

impl QueryResetPolicy {
    /// Name used on the command line and in config.
    pub fn as_str(self) -> &'static str {
        match self {
            QueryResetPolicy::Keep => "keep",
            QueryResetPolicy::ClearOnBack => "clear-on-back",
            QueryResetPolicy::ReplaceOnType => "replace-on-type",
        }
    }
}

impl fmt::Display for QueryResetPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Config or env value that names no policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown query policy '{0}': expected keep, clear-on-back or replace-on-type")]
pub struct UnknownQueryPolicy(pub String);

impl FromStr for QueryResetPolicy {
    type Err = UnknownQueryPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep" => Ok(QueryResetPolicy::Keep),
            "clear-on-back" => Ok(QueryResetPolicy::ClearOnBack),
            "replace-on-type" => Ok(QueryResetPolicy::ReplaceOnType),
            _ => Err(UnknownQueryPolicy(s.to_string())),
        }
    }
}

// ===== Action =====

/// Every input the state machine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Search screen: query editing
    /// Insert a character at the query cursor.
    InsertChar(char),
    /// Delete the character before the query cursor.
    Backspace,
    /// Delete the character under the query cursor.
    Delete,
    /// Move the query cursor one character left.
    QueryCursorLeft,
    /// Move the query cursor one character right.
    QueryCursorRight,
    /// Move the query cursor to the start.
    QueryCursorHome,
    /// Move the query cursor to the end.
    QueryCursorEnd,
    /// Empty the query.
    ClearQuery,

    // Screen transitions
    /// `Search → Results`.
    Submit,
    /// `Results → Search`.
    Back,

    // Views
    /// Show a specific view.
    SetTab(ViewTab),
    /// Show the next view, wrapping.
    NextTab,
    /// Show the previous view, wrapping.
    PrevTab,

    // Highlight within the active view
    /// Highlight the previous item.
    CursorUp,
    /// Highlight the next item.
    CursorDown,
    /// Highlight the first item.
    CursorHome,
    /// Highlight the last item.
    CursorEnd,
    /// Place the highlight on a specific item (e.g. mouse hover/click).
    CursorTo(usize),
    /// Select whatever the highlight is on.
    ActivateCursor,

    // Selection
    /// Select a record, or clear the selection with `None`.
    Select(Option<RecordId>),
    /// Select the record linked to a graph node. Unknown nodes are ignored.
    SelectNode(String),
    /// Close the detail panel.
    CloseDetail,

    /// Show or hide the key help overlay.
    ToggleHelp,
}

// ===== AppState =====

/// Application state. Pure data, no side effects.
///
/// # State Machine
///
/// Two screens (`Search`, `Results`) plus independent variables:
///
/// - **active_tab**: Flow/Graph/List; switching never touches query or selection
/// - **selected**: at most one record; replaced by a new selection, never stacked
/// - **query**: retained across tab switches and detail open/close; the
///   reset behaviour on `Back` follows [`QueryResetPolicy`]
/// - **cursor**: keyboard highlight inside the active view; reset on tab
///   switch and query edits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    screen: Screen,
    active_tab: ViewTab,
    query: QueryInput,
    /// Set by `Back` under `ReplaceOnType`: next typed char starts a new query.
    query_stale: bool,
    selected: Option<RecordId>,
    cursor: usize,
    help_visible: bool,
    query_policy: QueryResetPolicy,
}

impl AppState {
    /// Initial state: search screen, Flow tab, empty query, nothing selected.
    pub fn new(query_policy: QueryResetPolicy) -> Self {
        Self {
            screen: Screen::Search,
            active_tab: ViewTab::Flow,
            query: QueryInput::default(),
            query_stale: false,
            selected: None,
            cursor: 0,
            help_visible: false,
            query_policy,
        }
    }

    /// Start with a pre-filled query (e.g. from the command line).
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = QueryInput::new(query);
        self
    }

    /// Start on a given tab.
    pub fn with_tab(mut self, tab: ViewTab) -> Self {
        self.active_tab = tab;
        self
    }

    /// Start directly on the results screen.
    pub fn on_results(mut self) -> Self {
        self.screen = Screen::Results;
        self
    }

    // ===== Accessors =====

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// View shown on the results screen.
    pub fn active_tab(&self) -> ViewTab {
        self.active_tab
    }

    /// Query text.
    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    /// Query text with its editing cursor.
    pub fn query_input(&self) -> &QueryInput {
        &self.query
    }

    /// Whether the shown query will be replaced by the next typed character.
    pub fn is_query_stale(&self) -> bool {
        self.query_stale
    }

    /// Record whose detail panel is open.
    pub fn selected(&self) -> Option<&RecordId> {
        self.selected.as_ref()
    }

    /// Keyboard highlight index within the active view.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the help overlay is shown.
    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// How the query behaves when going back to search.
    pub fn query_policy(&self) -> QueryResetPolicy {
        self.query_policy
    }

    // ===== Derived views =====

    /// Records matching the current query, in store order.
    pub fn filtered<'s>(&self, store: &'s RecordStore) -> Vec<&'s FlowRecord> {
        filter(store.records(), self.query.as_str())
    }

    /// The selected record resolved against the store.
    pub fn selected_record<'s>(&self, store: &'s RecordStore) -> Option<&'s FlowRecord> {
        self.selected.as_ref().and_then(|id| store.record(id))
    }

    /// Number of highlightable items in the active view.
    pub fn item_count(&self, store: &RecordStore) -> usize {
        match self.active_tab {
            ViewTab::Graph => store.graph().nodes.len(),
            ViewTab::Flow | ViewTab::List => self.filtered(store).len(),
        }
    }

    // ===== Reducer =====

    /// Apply an action, returning the next state.
    ///
    /// Actions that make no sense in the current screen are no-ops rather
    /// than errors: query edits only apply on `Search`, view navigation
    /// only on `Results`.
    pub fn apply(self, action: Action, store: &RecordStore) -> Self {
        match action {
            Action::InsertChar(ch) => self.edit_query(store, |q, stale| {
                let q = if stale { QueryInput::default() } else { q };
                query_input::insert_char(q, ch)
            }),
            Action::Backspace => self.edit_query(store, |q, _| query_input::backspace(q)),
            Action::Delete => self.edit_query(store, |q, _| query_input::delete(q)),
            Action::QueryCursorLeft => self.edit_query(store, |q, _| query_input::cursor_left(q)),
            Action::QueryCursorRight => {
                self.edit_query(store, |q, _| query_input::cursor_right(q))
            }
            Action::QueryCursorHome => self.edit_query(store, |q, _| query_input::cursor_home(q)),
            Action::QueryCursorEnd => self.edit_query(store, |q, _| query_input::cursor_end(q)),
            Action::ClearQuery => self.edit_query(store, |_, _| QueryInput::default()),

            Action::Submit => match self.screen {
                Screen::Search => Self {
                    screen: Screen::Results,
                    query_stale: false,
                    ..self
                }
                .clamp_cursor(store),
                Screen::Results => self,
            },
            Action::Back => match self.screen {
                Screen::Results => self.back(),
                Screen::Search => self,
            },

            Action::SetTab(tab) => self.switch_tab(tab),
            Action::NextTab => {
                let tab = self.active_tab.next();
                self.switch_tab(tab)
            }
            Action::PrevTab => {
                let tab = self.active_tab.prev();
                self.switch_tab(tab)
            }

            Action::CursorUp => self.move_cursor(store, |c, _| c.saturating_sub(1)),
            Action::CursorDown => self.move_cursor(store, |c, _| c + 1),
            Action::CursorHome => self.move_cursor(store, |_, _| 0),
            Action::CursorEnd => self.move_cursor(store, |_, n| n.saturating_sub(1)),
            Action::CursorTo(index) => self.move_cursor(store, |_, _| index),
            Action::ActivateCursor => self.activate_cursor(store),

            Action::Select(Some(id)) => match store.record(&id) {
                Some(_) => Self {
                    selected: Some(id),
                    ..self
                },
                None => self,
            },
            Action::Select(None) | Action::CloseDetail => Self {
                selected: None,
                ..self
            },
            Action::SelectNode(node_id) => match store.record_for_node(&node_id) {
                Some(record) => Self {
                    selected: Some(record.id.clone()),
                    ..self
                },
                None => self,
            },

            Action::ToggleHelp => Self {
                help_visible: !self.help_visible,
                ..self
            },
        }
    }

    /// Apply a sequence of actions in order.
    pub fn apply_all(self, actions: impl IntoIterator<Item = Action>, store: &RecordStore) -> Self {
        actions
            .into_iter()
            .fold(self, |state, action| state.apply(action, store))
    }

    // ===== Transition helpers =====

    fn edit_query(
        self,
        store: &RecordStore,
        edit: impl FnOnce(QueryInput, bool) -> QueryInput,
    ) -> Self {
        if self.screen != Screen::Search {
            return self;
        }
        let query = edit(self.query, self.query_stale);
        Self {
            query,
            query_stale: false,
            cursor: 0,
            ..self
        }
        .clamp_cursor(store)
    }

    fn back(self) -> Self {
        let (query, query_stale) = match self.query_policy {
            QueryResetPolicy::Keep => (self.query, false),
            QueryResetPolicy::ClearOnBack => (QueryInput::default(), false),
            QueryResetPolicy::ReplaceOnType => (self.query, true),
        };
        Self {
            screen: Screen::Search,
            query,
            query_stale,
            help_visible: false,
            ..self
        }
    }

    fn switch_tab(self, tab: ViewTab) -> Self {
        if self.screen != Screen::Results || tab == self.active_tab {
            return self;
        }
        Self {
            active_tab: tab,
            cursor: 0,
            ..self
        }
    }

    fn move_cursor(self, store: &RecordStore, step: impl FnOnce(usize, usize) -> usize) -> Self {
        if self.screen != Screen::Results {
            return self;
        }
        let count = self.item_count(store);
        let cursor = step(self.cursor, count);
        Self { cursor, ..self }.clamp_cursor(store)
    }

    fn clamp_cursor(self, store: &RecordStore) -> Self {
        let max = self.item_count(store).saturating_sub(1);
        Self {
            cursor: self.cursor.min(max),
            ..self
        }
    }

    fn activate_cursor(self, store: &RecordStore) -> Self {
        if self.screen != Screen::Results {
            return self;
        }
        match self.active_tab {
            ViewTab::Graph => match store.node_id_at(self.cursor) {
                Some(node) => {
                    let node = node.as_str().to_string();
                    self.apply(Action::SelectNode(node), store)
                }
                None => self,
            },
            ViewTab::Flow | ViewTab::List => {
                let id = self.filtered(store).get(self.cursor).map(|r| r.id.clone());
                match id {
                    Some(id) => self.apply(Action::Select(Some(id)), store),
                    None => self,
                }
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(QueryResetPolicy::default())
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
