use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::model::config::ViewConfig;

/// Which activities the view shows, by completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    #[value(alias = "todas")]
    #[serde(alias = "todas")]
    All,
    #[value(alias = "pendientes")]
    #[serde(alias = "pendientes")]
    Pending,
    #[value(alias = "completadas")]
    #[serde(alias = "completadas")]
    Completed,
}

/// Ordering of the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    #[value(alias = "fecha")]
    #[serde(alias = "fecha")]
    Date,
    #[value(alias = "prioridad")]
    #[serde(alias = "prioridad")]
    Priority,
    #[value(alias = "titulo")]
    #[serde(alias = "titulo")]
    Title,
}

impl Filter {
    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Pending => "pending",
            Filter::Completed => "completed",
        }
    }
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Priority => "priority",
            SortKey::Title => "title",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Filter as ValueEnum>::from_str(s.trim(), true).map_err(|_| {
            format!(
                "unknown filter '{}' (expected: all, pending, completed)",
                s
            )
        })
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <SortKey as ValueEnum>::from_str(s.trim(), true)
            .map_err(|_| format!("unknown sort key '{}' (expected: date, priority, title)", s))
    }
}

/// Transient selectors that drive the derived view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    filter: Filter,
    /// Always trimmed and lower-cased
    search: String,
    sort: SortKey,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ViewConfig) -> Self {
        ViewState {
            filter: config.filter,
            search: String::new(),
            sort: config.sort,
        }
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.trim().to_lowercase();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }
}
