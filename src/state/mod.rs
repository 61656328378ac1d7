//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod filter;
pub mod query_input;

// Re-export for convenience
pub use app_state::{Action, AppState, QueryResetPolicy, Screen, UnknownQueryPolicy};
pub use filter::{filter, record_matches, search_corpus};
pub use query_input::QueryInput;
