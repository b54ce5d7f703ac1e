use serde::Serialize;

use crate::model::activity::{Activity, ActivityId};
use crate::model::config::UiConfig;
use crate::model::view::{Filter, SortKey, ViewState};
use crate::ops::stats::Stats;
use crate::util::unicode::{display_width, pad_to_width, truncate_to_width};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ViewJson {
    pub filter: Filter,
    pub sort: SortKey,
    pub search: String,
}

/// Everything the collaborator draws after an intent
#[derive(Serialize)]
pub struct SnapshotJson<'a> {
    pub view: ViewJson,
    pub activities: Vec<&'a Activity>,
    pub stats: Stats,
}

#[derive(Serialize)]
pub struct AddedJson<'a> {
    pub added: &'a ActivityId,
}

pub fn view_to_json(view: &ViewState) -> ViewJson {
    ViewJson {
        filter: view.filter(),
        sort: view.sort(),
        search: view.search().to_string(),
    }
}

pub fn snapshot_to_json<'a>(
    view: &ViewState,
    rows: Vec<&'a Activity>,
    stats: Stats,
) -> SnapshotJson<'a> {
    SnapshotJson {
        view: view_to_json(view),
        activities: rows,
        stats,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

const EMPTY_VIEW: &str = "(no activities)";
const MISSING: &str = "-";

/// Estimated hours as the user typed them (`3`, not `3.0`)
pub fn format_time(time: Option<f64>) -> String {
    match time {
        Some(t) => format!("{}", t),
        None => MISSING.to_string(),
    }
}

fn or_missing(s: &str) -> String {
    if s.is_empty() {
        MISSING.to_string()
    } else {
        s.replace('\t', " ")
    }
}

/// `[x]` for completed, followed by `!` when important
fn status_mark(activity: &Activity) -> String {
    format!(
        "[{}]{}",
        if activity.completed { 'x' } else { ' ' },
        if activity.important { "!" } else { "" }
    )
}

/// Format the derived view as an aligned table.
pub fn format_table(rows: &[&Activity], ui: &UiConfig) -> Vec<String> {
    if rows.is_empty() {
        return vec![EMPTY_VIEW.to_string()];
    }

    let mut header = vec!["ID", "", "TITLE", "SUBJECT", "TYPE", "PRIORITY", "DATE", "TIME"];
    if ui.show_notes {
        header.push("NOTES");
    }
    let title_col = 2;
    let notes_col = 8;

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|a| {
            let mut row = vec![
                a.id.to_string(),
                status_mark(a),
                or_missing(&a.title),
                or_missing(&a.subject),
                or_missing(&a.kind),
                or_missing(a.priority.label()),
                a.date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| MISSING.to_string()),
                format_time(a.time),
            ];
            if ui.show_notes {
                row.push(or_missing(&a.notes));
            }
            row
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            let widest = cells
                .iter()
                .map(|row| display_width(&row[col]))
                .chain(std::iter::once(display_width(header[col])))
                .max()
                .unwrap_or(0);
            if col == title_col || col == notes_col {
                widest.min(ui.title_width.max(1))
            } else {
                widest
            }
        })
        .collect();

    let render = |row: &[&str]| -> String {
        let parts: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| pad_to_width(cell, w))
            .collect();
        parts.join("  ").trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render(&header[..]));
    for row in &cells {
        let refs: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(render(&refs[..]));
    }
    lines
}

pub fn format_stats(stats: &Stats) -> String {
    format!(
        "total: {}  completed: {}  pending: {}  time: {}",
        stats.total,
        stats.completed,
        stats.pending,
        format_time(Some(stats.total_time))
    )
}

/// Format a one-line summary of the view state, shown above the table
pub fn format_view_line(view: &ViewState) -> String {
    let mut line = format!("filter: {}  sort: {}", view.filter(), view.sort());
    if !view.search().is_empty() {
        line.push_str(&format!("  search: \"{}\"", view.search()));
    }
    line
}

/// Format detailed activity view
pub fn format_activity_detail(activity: &Activity) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} {}",
        status_mark(activity),
        activity.id,
        truncate_to_width(&activity.title, 80)
    )];

    let fields = [
        ("subject", activity.subject.as_str()),
        ("type", activity.kind.as_str()),
        ("difficulty", activity.difficulty.as_str()),
        ("priority", activity.priority.label()),
    ];
    for (key, value) in fields {
        if !value.is_empty() {
            lines.push(format!("{}: {}", key, value));
        }
    }
    if let Some(date) = activity.date {
        lines.push(format!("date: {}", date.format("%Y-%m-%d")));
    }
    if activity.time.is_some() {
        lines.push(format!("time: {}", format_time(activity.time)));
    }
    if activity.important {
        lines.push("important: yes".to_string());
    }
    if !activity.notes.is_empty() {
        lines.push("notes:".to_string());
        for line in activity.notes.lines() {
            lines.push(format!("  {}", line));
        }
    }
    lines
}
