use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::Path;

use clap::Parser;
use clap::error::ErrorKind;

use crate::cli::commands::{Cli, IntentLine};
use crate::cli::output::*;
use crate::cli::session::{Reply, Session};
use crate::io::config_io;
use crate::util::words::split_words;

/// How a session renders its replies
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub json: bool,
    pub quiet: bool,
    /// Print a prompt before each line (interactive terminals only)
    pub prompt: bool,
}

/// Counts reported once input is exhausted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub lines: usize,
    pub failed: usize,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run the binary. Returns `Ok(false)` when any input line failed.
pub fn dispatch(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let config = config_io::load_config(cli.config.as_deref().map(Path::new), &cwd)?;
    let mut session = Session::new(config)?;

    let stdout = io::stdout();
    let stderr = io::stderr();
    let summary = match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("cannot open script '{}': {}", path, e))?;
            let opts = RenderOptions {
                json: cli.json,
                quiet: cli.quiet,
                prompt: false,
            };
            run_session(
                &mut session,
                BufReader::new(file),
                &mut stdout.lock(),
                &mut stderr.lock(),
                opts,
            )?
        }
        None => {
            let stdin = io::stdin();
            let opts = RenderOptions {
                json: cli.json,
                quiet: cli.quiet,
                prompt: stdin.is_terminal() && !cli.json,
            };
            run_session(
                &mut session,
                stdin.lock(),
                &mut stdout.lock(),
                &mut stderr.lock(),
                opts,
            )?
        }
    };
    Ok(summary.failed == 0)
}

/// Read intents line by line and redraw after each one.
///
/// Failed lines are reported on `err` as `error: line N: ...` and skipped.
pub fn run_session<R: BufRead, W: Write, E: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    err: &mut E,
    opts: RenderOptions,
) -> io::Result<SessionSummary> {
    let mut summary = SessionSummary::default();
    let mut lines = input.lines();

    if opts.prompt && !opts.quiet {
        draw_snapshot(session, out, opts)?;
    }
    loop {
        if opts.prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else { break };
        let line = line?;
        summary.lines += 1;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let words = match split_words(trimmed) {
            Ok(words) => words,
            Err(e) => {
                report(err, &mut summary, &e.to_string())?;
                continue;
            }
        };
        let intent = match IntentLine::try_parse_from(words) {
            Ok(parsed) => parsed.intent,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                write!(out, "{}", e.render())?;
                continue;
            }
            Err(e) => {
                report(err, &mut summary, &clap_message(&e))?;
                continue;
            }
        };

        match session.apply(intent) {
            Ok(Reply::Quit) => break,
            Ok(reply) => draw_reply(session, &reply, out, opts)?,
            Err(e) => report(err, &mut summary, &e.to_string())?,
        }
    }
    Ok(summary)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw_reply<W: Write>(
    session: &Session,
    reply: &Reply,
    out: &mut W,
    opts: RenderOptions,
) -> io::Result<()> {
    match reply {
        Reply::Added(id) => {
            if opts.json {
                writeln!(out, "{}", to_json(&AddedJson { added: id })?)?;
            } else {
                writeln!(out, "added {}", id)?;
            }
            if !opts.quiet {
                draw_snapshot(session, out, opts)?;
            }
        }
        Reply::Changed => {
            if !opts.quiet {
                draw_snapshot(session, out, opts)?;
            }
        }
        Reply::Table => draw_snapshot(session, out, opts)?,
        Reply::Stats => {
            let stats = session.stats();
            if opts.json {
                writeln!(out, "{}", to_json(&stats)?)?;
            } else {
                writeln!(out, "{}", format_stats(&stats))?;
            }
        }
        Reply::Detail(id) => {
            if let Some(activity) = session.get(id) {
                if opts.json {
                    writeln!(out, "{}", to_json(activity)?)?;
                } else {
                    for line in format_activity_detail(activity) {
                        writeln!(out, "{}", line)?;
                    }
                }
            }
        }
        Reply::Quit => {}
    }
    Ok(())
}

/// The full redraw: view line, table and totals
fn draw_snapshot<W: Write>(session: &Session, out: &mut W, opts: RenderOptions) -> io::Result<()> {
    let rows = session.rows();
    if opts.json {
        let snapshot = snapshot_to_json(session.view(), rows, session.stats());
        return writeln!(out, "{}", to_json(&snapshot)?);
    }
    writeln!(out, "{}", format_view_line(session.view()))?;
    for line in format_table(&rows, &session.config().ui) {
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "{}", format_stats(&session.stats()))?;
    writeln!(out)
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> io::Result<String> {
    serde_json::to_string(value).map_err(io::Error::other)
}

fn report<E: Write>(err: &mut E, summary: &mut SessionSummary, msg: &str) -> io::Result<()> {
    summary.failed += 1;
    writeln!(err, "error: line {}: {}", summary.lines, msg)
}

/// First line of a clap error, without its own `error: ` prefix
fn clap_message(e: &clap::Error) -> String {
    let rendered = e.render().to_string();
    let first = rendered.lines().next().unwrap_or("invalid command");
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::TallyConfig;
    use pretty_assertions::assert_eq;

    fn run_script(script: &str, opts: RenderOptions) -> (String, String, SessionSummary) {
        let mut session = Session::new(TallyConfig::default()).unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let summary = run_session(&mut session, script.as_bytes(), &mut out, &mut err, opts).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
            summary,
        )
    }

    fn quiet() -> RenderOptions {
        RenderOptions {
            quiet: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_quiet_session_prints_only_explicit_requests() {
        let (out, err, summary) = run_script(
            "# study plan\nadd Essay --time 3\n\nadd Quiz --time 1\nstats\n",
            quiet(),
        );
        assert_eq!(
            out,
            "added A-001\nadded A-002\ntotal: 2  completed: 0  pending: 2  time: 4\n"
        );
        assert_eq!(err, "");
        assert_eq!(summary, SessionSummary { lines: 5, failed: 0 });
    }

    #[test]
    fn test_errors_are_reported_with_line_numbers() {
        let (out, err, summary) = run_script(
            "add \"  \"\nadd Essay --time soon\ndone A-009\nfilter someday\nadd \"open\n",
            quiet(),
        );
        assert_eq!(out, "");
        let lines: Vec<&str> = err.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "error: line 1: title cannot be empty");
        assert_eq!(
            lines[1],
            "error: line 2: estimated time must be a number >= 0, got 'soon'"
        );
        assert_eq!(lines[2], "error: line 3: activity not found: A-009");
        assert!(lines[3].starts_with("error: line 4: "));
        assert_eq!(lines[4], "error: line 5: unterminated \" quote");
        assert_eq!(summary.failed, 5);
    }

    #[test]
    fn test_quit_stops_reading() {
        let (out, _, summary) = run_script("add Essay\nquit\nadd Quiz\n", quiet());
        assert_eq!(out, "added A-001\n");
        assert_eq!(summary.lines, 2);
    }

    #[test]
    fn test_redraw_after_each_change() {
        let (out, _, _) = run_script(
            "add Essay\nfilter completed\n",
            RenderOptions::default(),
        );
        assert_eq!(
            out,
            "added A-001\n\
             filter: all  sort: date\n\
             ID          TITLE  SUBJECT  TYPE  PRIORITY  DATE  TIME\n\
             A-001  [ ]  Essay  -        -     -         -     -\n\
             total: 1  completed: 0  pending: 1  time: 0\n\
             \n\
             filter: completed  sort: date\n\
             (no activities)\n\
             total: 1  completed: 0  pending: 1  time: 0\n\
             \n"
        );
    }

    #[test]
    fn test_json_output() {
        let (out, _, _) = run_script(
            "add Essay --priority high --time 3\nshow A-001\n",
            RenderOptions {
                json: true,
                ..Default::default()
            },
        );
        let docs: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0]["added"], "A-001");
        assert_eq!(docs[1]["activities"][0]["title"], "Essay");
        assert_eq!(docs[1]["stats"]["total_time"], 3.0);
        assert_eq!(docs[2]["priority"], "high");
    }
}
