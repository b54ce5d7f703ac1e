use std::cmp::Ordering;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};

use crate::model::activity::Activity;
use crate::model::view::{Filter, SortKey, ViewState};

/// Compute the displayed sequence: filter by completion, then search, then sort.
///
/// Pure; the returned references borrow from `records`. The sort is stable, so
/// activities with equal keys keep their insertion order.
pub fn derive<'a>(
    records: &'a [Activity],
    view: &ViewState,
    collator: &TitleCollator,
) -> Vec<&'a Activity> {
    let mut rows: Vec<&Activity> = records
        .iter()
        .filter(|a| matches_filter(a, view.filter()))
        .filter(|a| matches_search(a, view.search()))
        .collect();
    sort_activities(&mut rows, view.sort(), collator);
    rows
}

pub fn matches_filter(activity: &Activity, filter: Filter) -> bool {
    match filter {
        Filter::All => true,
        Filter::Pending => !activity.completed,
        Filter::Completed => activity.completed,
    }
}

/// Case-insensitive substring match on title or subject.
///
/// The needle is normalized here as well, so callers may pass raw text.
pub fn matches_search(activity: &Activity, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    activity.title.to_lowercase().contains(&needle)
        || activity.subject.to_lowercase().contains(&needle)
}

pub fn sort_activities(rows: &mut [&Activity], key: SortKey, collator: &TitleCollator) {
    match key {
        SortKey::Date => rows.sort_by(|a, b| match (a.date, b.date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        SortKey::Priority => rows.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank())),
        SortKey::Title => rows.sort_by(|a, b| collator.compare(&a.title, &b.title)),
    }
}

// ---------------------------------------------------------------------------
// Title collation
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
#[error("could not load title collation data: {0}")]
pub struct CollationError(String);

/// Locale-aware title comparison (Unicode collation, root locale).
///
/// Built once and shared by every sort. Punctuation sorts before letters,
/// accents and case only break ties, and ligatures like `Æ` compare as their
/// expansion.
pub struct TitleCollator(CollatorBorrowed<'static>);

impl TitleCollator {
    pub fn new() -> Result<Self, CollationError> {
        Collator::try_new(Default::default(), CollatorOptions::default())
            .map(TitleCollator)
            .map_err(|e| CollationError(e.to_string()))
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.0.compare(a, b)
    }
}
