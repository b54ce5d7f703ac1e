use serde::{Deserialize, Serialize};

use crate::model::view::{Filter, SortKey};

/// Configuration from tally.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TallyConfig {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub ids: IdConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Initial view state of a session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub filter: Filter,
    #[serde(default)]
    pub sort: SortKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdConfig {
    /// Prefix of generated activity IDs (`A` gives `A-001`, `A-002`, ...)
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for IdConfig {
    fn default() -> Self {
        IdConfig {
            prefix: default_prefix(),
        }
    }
}

fn default_prefix() -> String {
    "A".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Widest the title column may get before cells are truncated
    #[serde(default = "default_title_width")]
    pub title_width: usize,
    #[serde(default)]
    pub show_notes: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            title_width: default_title_width(),
            show_notes: false,
        }
    }
}

fn default_title_width() -> usize {
    32
}
