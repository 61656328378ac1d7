//! chainview
//!
//! TUI application for browsing supply-chain traceability records: a
//! free-text search over flow records, then Flow, Graph and List views of
//! the matching set with a detail panel for the selected record.
//!
//! Pure Core / Impure Shell: `model`, `state` and `view_state` hold no I/O;
//! `store` loads datasets, `view` owns the terminal.

pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod store;
pub mod view;
pub mod view_state;
