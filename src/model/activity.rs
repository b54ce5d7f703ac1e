use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// Stable identifier of an activity, like `A-007`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ActivityId(pub String);

impl ActivityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActivityId {
    fn from(s: &str) -> Self {
        ActivityId(s.to_string())
    }
}

/// Activity priority. Anything unrecognized is `Unset`, written as `""`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    #[serde(rename = "")]
    Unset,
    Low,
    Medium,
    High,
}

impl Priority {
    /// Parse user input. Spanish labels (`baja`, `media`, `alta`) are accepted too.
    pub fn parse(s: &str) -> Priority {
        match s.trim().to_lowercase().as_str() {
            "low" | "baja" => Priority::Low,
            "medium" | "media" => Priority::Medium,
            "high" | "alta" => Priority::High,
            _ => Priority::Unset,
        }
    }

    /// Sort rank; higher sorts first under priority ordering
    pub fn rank(self) -> u8 {
        match self {
            Priority::Unset => 0,
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Unset => "",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// A tracked activity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    pub id: ActivityId,
    /// Never empty
    pub title: String,
    pub subject: String,
    /// The activity type (exam, essay, reading, ...)
    #[serde(rename = "type")]
    pub kind: String,
    pub difficulty: String,
    pub priority: Priority,
    /// Deadline
    pub date: Option<NaiveDate>,
    /// Estimated time in hours, never negative
    pub time: Option<f64>,
    pub notes: String,
    pub important: bool,
    pub completed: bool,
}

/// An unvalidated activity as submitted by the user.
///
/// Every field is raw text the way a form hands it over; `ActivityStore::add`
/// trims, parses and validates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewActivity {
    pub title: String,
    pub subject: String,
    pub kind: String,
    pub difficulty: String,
    pub priority: String,
    pub date: String,
    pub time: String,
    pub notes: String,
    pub important: bool,
}

impl NewActivity {
    pub fn titled(title: impl Into<String>) -> Self {
        NewActivity {
            title: title.into(),
            ..Default::default()
        }
    }
}
