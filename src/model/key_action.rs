//! Domain-level keyboard actions independent of key bindings.

use super::view_tab::ViewTab;

/// Domain-level actions on the results screen.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
/// Text entry on the search screen bypasses bindings entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Tabs
    /// Switch to a specific view. Default: 1/2/3 or f/g/l
    SelectTab(ViewTab),
    /// Cycle to the next view. Default: Tab
    NextTab,
    /// Cycle to the previous view. Default: Shift+Tab
    PrevTab,

    // Highlight movement
    /// Move highlight up. Default: k/↑
    CursorUp,
    /// Move highlight down. Default: j/↓
    CursorDown,
    /// Jump to first item. Default: Home
    CursorHome,
    /// Jump to last item. Default: End
    CursorEnd,

    // Selection
    /// Open the highlighted item in the detail panel. Default: Enter/Space
    Activate,
    /// Close the detail panel. Default: x
    CloseDetail,
    /// Close help, then detail, then go back to search. Default: Esc
    Dismiss,

    // Screens
    /// Return to the search screen. Default: b/Backspace
    Back,

    // Application
    /// Show help overlay. Default: ?
    Help,
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}
