use serde::Serialize;

use crate::model::activity::Activity;

/// Aggregate counts over every activity, regardless of the current view
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Sum of estimated hours; activities without an estimate count as zero
    pub total_time: f64,
}

pub fn stats(records: &[Activity]) -> Stats {
    let completed = records.iter().filter(|a| a.completed).count();
    Stats {
        total: records.len(),
        completed,
        pending: records.len() - completed,
        total_time: records
            .iter()
            .filter_map(|a| a.time)
            .fold(0.0, |acc, t| acc + t),
    }
}
