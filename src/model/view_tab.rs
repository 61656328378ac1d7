//! The three presentation modes of the results screen.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which presentation of the filtered records is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewTab {
    /// Card per record.
    #[default]
    Flow,
    /// Node-link network.
    Graph,
    /// Table row per record.
    List,
}

impl ViewTab {
    /// All tabs in display order.
    pub const ALL: [ViewTab; 3] = [ViewTab::Flow, ViewTab::Graph, ViewTab::List];

    /// Label in the tab bar.
    pub fn title(self) -> &'static str {
        match self {
            ViewTab::Flow => "Flow",
            ViewTab::Graph => "Graph",
            ViewTab::List => "List",
        }
    }

    /// Position in [`ViewTab::ALL`].
    pub fn index(self) -> usize {
        match self {
            ViewTab::Flow => 0,
            ViewTab::Graph => 1,
            ViewTab::List => 2,
        }
    }

    /// Next tab, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous tab, wrapping around.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ViewTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Config or env value that names no tab.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown view '{0}': expected flow, graph or list")]
pub struct UnknownViewTab(pub String);

impl FromStr for ViewTab {
    type Err = UnknownViewTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flow" => Ok(ViewTab::Flow),
            "graph" => Ok(ViewTab::Graph),
            "list" => Ok(ViewTab::List),
            _ => Err(UnknownViewTab(s.to_string())),
        }
    }
}
