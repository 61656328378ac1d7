//! Colour and text styling.
//!
//! Every widget takes its styles from a [`ViewStyles`] so that `--no-color`
//! and `NO_COLOR` turn off colour everywhere at once. Emphasis (bold,
//! reversed, dim) survives with colours disabled; it is what keeps the
//! highlight and selection visible on monochrome terminals.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Explicit setting, ignoring the environment.
    pub fn with_colors(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== ViewStyles =====

/// Styles shared by all widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewStyles {
    colors: bool,
    /// Header title.
    pub title: Style,
    /// Header subtitle and search hint.
    pub subtitle: Style,
    /// Secondary text such as dates and counts.
    pub muted: Style,
    /// Unfocused borders.
    pub border: Style,
    /// Border of the highlighted card or node.
    pub focused_border: Style,
    /// Interactive labels.
    pub accent: Style,
    /// Stage badge on flow cards.
    pub badge: Style,
    /// Tag chips.
    pub chip: Style,
    /// Section headings in help and detail.
    pub section_header: Style,
    /// Key names in help and status lines.
    pub key_hint: Style,
    /// Title of the shown tab.
    pub active_tab: Style,
    /// Titles of the other tabs.
    pub inactive_tab: Style,
    /// Keyboard highlight.
    pub highlight: Style,
    /// Item whose detail panel is open.
    pub selected: Style,
    /// Graph nodes outside the filtered set.
    pub dimmed: Style,
    /// Graph edge lines.
    pub edge: Style,
    /// Graph edge labels.
    pub edge_label: Style,
    /// Block cursor in the query input.
    pub input_cursor: Style,
    /// Placeholder text in the query input.
    pub placeholder: Style,
}

impl ViewStyles {
    /// Styles for the given colour configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let colors = config.colors_enabled();
        let fg = |color: Color| {
            if colors {
                Style::default().fg(color)
            } else {
                Style::default()
            }
        };
        let bold = Style::default().add_modifier(Modifier::BOLD);

        Self {
            colors,
            title: fg(Color::Green).add_modifier(Modifier::BOLD),
            subtitle: fg(Color::Gray),
            muted: fg(Color::DarkGray),
            border: fg(Color::DarkGray),
            focused_border: fg(Color::Green),
            accent: fg(Color::Green),
            badge: if colors {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD)
            } else {
                bold
            },
            chip: fg(Color::Cyan),
            section_header: fg(Color::Yellow).add_modifier(Modifier::BOLD),
            key_hint: fg(Color::Yellow).add_modifier(Modifier::BOLD),
            active_tab: fg(Color::Green).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            inactive_tab: fg(Color::Gray),
            highlight: Style::default().add_modifier(Modifier::REVERSED),
            selected: fg(Color::LightGreen).add_modifier(Modifier::BOLD),
            dimmed: fg(Color::DarkGray).add_modifier(Modifier::DIM),
            edge: fg(Color::Gray),
            edge_label: fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            input_cursor: if colors {
                Style::default()
                    .bg(Color::White)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::REVERSED)
            },
            placeholder: fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        }
    }

    /// Whether colours are in use.
    pub fn colors_enabled(&self) -> bool {
        self.colors
    }

    /// Border colour for a graph node, keyed by its group.
    pub fn group_style(&self, group: &str) -> Style {
        if !self.colors {
            return Style::default();
        }
        let color = match group {
            "Farm" => Color::Green,
            "Transport" => Color::Blue,
            "Processor" => Color::Red,
            "Case-Ready" => Color::Magenta,
            "DC" => Color::Yellow,
            "Store" => Color::Cyan,
            _ => Color::White,
        };
        Style::default().fg(color)
    }
}

impl Default for ViewStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
