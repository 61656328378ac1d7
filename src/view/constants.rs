//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the header bar in lines (border + title + subtitle).
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the results bar ("New search" control and current query).
pub const RESULTS_BAR_HEIGHT: u16 = 1;

/// Height of the tab bar in lines.
pub const TAB_BAR_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
///
/// Single line for keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of the query input box on the search screen (border + text).
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Maximum width of the search card.
pub const SEARCH_CARD_MAX_WIDTH: u16 = 72;

/// Height of one flow card in lines, borders included.
pub const FLOW_CARD_HEIGHT: u16 = 6;

/// Content widths below which the flow grid uses one or two columns.
pub const FLOW_ONE_COLUMN_BELOW: u16 = 60;
/// Below this width the grid has two columns, otherwise three.
pub const FLOW_TWO_COLUMNS_BELOW: u16 = 100;

/// Height of a graph node box, borders included.
pub const GRAPH_NODE_HEIGHT: u16 = 4;

/// Preferred and minimum width of a graph node box.
pub const GRAPH_NODE_MAX_WIDTH: u16 = 22;
/// Narrowest node box before labels become unreadable.
pub const GRAPH_NODE_MIN_WIDTH: u16 = 8;

/// Width percentage for the detail panel on wide terminals.
pub const DETAIL_PANEL_WIDTH_PERCENT: u16 = 40;

/// The detail panel never gets narrower than this (or the full width if smaller).
pub const DETAIL_PANEL_MIN_WIDTH: u16 = 36;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Placeholder for absent route ends in the list view.
pub const ABSENT_FIELD: &str = "—";
