use chrono::NaiveDate;

use crate::model::activity::{Activity, ActivityId, NewActivity, Priority};

/// Why a candidate activity was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("title cannot be empty")]
    EmptyTitle,
    #[error("estimated time must be a number >= 0, got '{0}'")]
    InvalidTime(String),
    #[error("date must be YYYY-MM-DD, got '{0}'")]
    InvalidDate(String),
}

/// Error type for store operations on existing activities
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("activity not found: {0}")]
    NotFound(ActivityId),
}

/// Owns every activity of a session, in insertion order.
#[derive(Debug, Clone)]
pub struct ActivityStore {
    activities: Vec<Activity>,
    prefix: String,
    /// Last issued ID number; only ever grows
    last_id: usize,
}

impl Default for ActivityStore {
    fn default() -> Self {
        ActivityStore::new("A")
    }
}

impl ActivityStore {
    pub fn new(prefix: &str) -> Self {
        ActivityStore {
            activities: Vec::new(),
            prefix: prefix.to_string(),
            last_id: 0,
        }
    }

    /// Validate a candidate and append it. Returns the assigned ID.
    ///
    /// Nothing changes on error, including the ID counter.
    pub fn add(&mut self, candidate: NewActivity) -> Result<ActivityId, ValidationError> {
        let title = candidate.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let time = parse_time(&candidate.time)?;
        let date = parse_date(&candidate.date)?;

        self.last_id += 1;
        let id = ActivityId(format!("{}-{:03}", self.prefix, self.last_id));

        self.activities.push(Activity {
            id: id.clone(),
            title: title.to_string(),
            subject: candidate.subject.trim().to_string(),
            kind: candidate.kind.trim().to_string(),
            difficulty: candidate.difficulty.trim().to_string(),
            priority: Priority::parse(&candidate.priority),
            date,
            time,
            notes: candidate.notes.trim().to_string(),
            important: candidate.important,
            completed: false,
        });
        Ok(id)
    }

    /// Set the completion flag of one activity.
    pub fn set_completed(&mut self, id: &ActivityId, completed: bool) -> Result<(), StoreError> {
        let activity = self
            .activities
            .iter_mut()
            .find(|a| a.id == *id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        activity.completed = completed;
        Ok(())
    }

    /// Remove an activity for good, returning it.
    pub fn remove(&mut self, id: &ActivityId) -> Result<Activity, StoreError> {
        let idx = self
            .activities
            .iter()
            .position(|a| a.id == *id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok(self.activities.remove(idx))
    }

    pub fn all(&self) -> &[Activity] {
        &self.activities
    }

    pub fn get(&self, id: &ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == *id)
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

/// Blank means "no estimate".
fn parse_time(raw: &str) -> Result<Option<f64>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        // `-0` passes the sign check; store it as plain zero
        Ok(n) if n.is_finite() && n >= 0.0 => Ok(Some(n + 0.0)),
        _ => Err(ValidationError::InvalidTime(raw.to_string())),
    }
}

fn parse_date(raw: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn candidate(title: &str, priority: &str, time: &str) -> NewActivity {
        NewActivity {
            title: title.into(),
            priority: priority.into(),
            time: time.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut store = ActivityStore::default();
        let a = store.add(NewActivity::titled("Essay")).unwrap();
        let b = store.add(NewActivity::titled("Quiz")).unwrap();
        assert_eq!(a.as_str(), "A-001");
        assert_eq!(b.as_str(), "A-002");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_add_uses_prefix() {
        let mut store = ActivityStore::new("HW");
        let id = store.add(NewActivity::titled("Reading")).unwrap();
        assert_eq!(id.as_str(), "HW-001");
    }

    #[test]
    fn test_add_trims_and_parses_fields() {
        let mut store = ActivityStore::default();
        let id = store
            .add(NewActivity {
                title: "  Lab report ".into(),
                subject: " Chemistry ".into(),
                kind: "report".into(),
                difficulty: "hard".into(),
                priority: "Medium".into(),
                date: "2025-06-02".into(),
                time: " 1.5 ".into(),
                notes: " bring goggles ".into(),
                important: true,
            })
            .unwrap();
        let a = store.get(&id).unwrap();
        assert_eq!(a.title, "Lab report");
        assert_eq!(a.subject, "Chemistry");
        assert_eq!(a.priority, Priority::Medium);
        assert_eq!(a.date, NaiveDate::from_ymd_opt(2025, 6, 2));
        assert_eq!(a.time, Some(1.5));
        assert_eq!(a.notes, "bring goggles");
        assert!(a.important);
        assert!(!a.completed);
    }

    #[test]
    fn test_add_rejects_blank_title() {
        let mut store = ActivityStore::default();
        assert_eq!(
            store.add(NewActivity::titled("")),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(
            store.add(NewActivity::titled(" \t ")),
            Err(ValidationError::EmptyTitle)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_rejects_bad_time() {
        let mut store = ActivityStore::default();
        for bad in ["-1", "abc", "NaN", "inf", "1h"] {
            let err = store.add(candidate("Essay", "", bad)).unwrap_err();
            assert_eq!(err, ValidationError::InvalidTime(bad.to_string()));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_accepts_zero_and_blank_time() {
        let mut store = ActivityStore::default();
        let zero = store.add(candidate("A", "", "0")).unwrap();
        let neg_zero = store.add(candidate("B", "", "-0")).unwrap();
        let blank = store.add(candidate("C", "", "  ")).unwrap();
        assert_eq!(store.get(&zero).unwrap().time, Some(0.0));
        assert!(store.get(&neg_zero).unwrap().time.unwrap().is_sign_positive());
        assert_eq!(store.get(&blank).unwrap().time, None);
    }

    #[test]
    fn test_add_rejects_bad_date() {
        let mut store = ActivityStore::default();
        let mut c = NewActivity::titled("Essay");
        c.date = "next tuesday".into();
        assert_eq!(
            store.add(c),
            Err(ValidationError::InvalidDate("next tuesday".into()))
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_add_does_not_burn_an_id() {
        let mut store = ActivityStore::default();
        assert_eq!(
            store.add(NewActivity::titled("")).unwrap_err(),
            ValidationError::EmptyTitle
        );
        assert_eq!(
            store.add(candidate("Essay", "", "-1")).unwrap_err(),
            ValidationError::InvalidTime("-1".into())
        );
        let undated = NewActivity {
            date: "nope".into(),
            ..NewActivity::titled("Essay")
        };
        assert_eq!(
            store.add(undated).unwrap_err(),
            ValidationError::InvalidDate("nope".into())
        );
        assert!(store.is_empty());

        let id = store.add(NewActivity::titled("Essay")).unwrap();
        assert_eq!(id.as_str(), "A-001");
    }

    #[test]
    fn test_ids_never_reused_after_remove() {
        let mut store = ActivityStore::default();
        let mut seen = HashSet::new();
        for i in 0..5 {
            let id = store.add(NewActivity::titled(format!("task {}", i))).unwrap();
            assert!(seen.insert(id.clone()));
            store.remove(&id).unwrap();
        }
        let id = store.add(NewActivity::titled("last")).unwrap();
        assert!(!seen.contains(&id));
        assert_eq!(id.as_str(), "A-006");
    }

    #[test]
    fn test_set_completed_is_idempotent() {
        let mut store = ActivityStore::default();
        let id = store.add(NewActivity::titled("Essay")).unwrap();
        store.set_completed(&id, true).unwrap();
        let once = store.all().to_vec();
        store.set_completed(&id, true).unwrap();
        assert_eq!(store.all(), once.as_slice());
        assert!(store.get(&id).unwrap().completed);

        store.set_completed(&id, false).unwrap();
        assert!(!store.get(&id).unwrap().completed);
    }

    #[test]
    fn test_set_completed_unknown_id() {
        let mut store = ActivityStore::default();
        store.add(NewActivity::titled("Essay")).unwrap();
        let missing = ActivityId::from("A-999");
        assert_eq!(
            store.set_completed(&missing, true),
            Err(StoreError::NotFound(missing.clone()))
        );
        assert!(!store.all()[0].completed);
    }

    #[test]
    fn test_remove_twice() {
        let mut store = ActivityStore::default();
        let a = store.add(NewActivity::titled("Essay")).unwrap();
        let b = store.add(NewActivity::titled("Quiz")).unwrap();

        let removed = store.remove(&a).unwrap();
        assert_eq!(removed.title, "Essay");
        assert!(store.all().iter().all(|x| x.id != a));
        assert_eq!(store.remove(&a), Err(StoreError::NotFound(a.clone())));
        assert_eq!(store.all().len(), 1);
        assert_eq!(store.all()[0].id, b);
    }

    #[test]
    fn test_all_preserves_insertion_order() {
        let mut store = ActivityStore::default();
        for title in ["c", "a", "b"] {
            store.add(NewActivity::titled(title)).unwrap();
        }
        let titles: Vec<&str> = store.all().iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "a", "b"]);
    }
}
