//! JSON-lines session over stdin
//!
//! Each non-blank input line is one [`Command`]. Each produces exactly one
//! output line: the serialized [`Outcome`], or an error object. Errors do
//! not end the session.

use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use libforkful::events::EventReceiver;
use libforkful::{Command, ForkfulError, NotFoundError, Store};
use serde::Serialize;
use tokio::sync::broadcast::error::TryRecvError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub applied: usize,
    pub failed: usize,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "error")]
struct ErrorLine {
    line: usize,
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<BTreeMap<String, String>>,
}

impl ErrorLine {
    fn from_store_error(line: usize, error: &ForkfulError) -> Self {
        let (kind, fields) = match error {
            ForkfulError::Validation(errors) => ("validation", Some(errors.fields().clone())),
            ForkfulError::NotFound(NotFoundError::Recipe(_)) => ("recipe_not_found", None),
            ForkfulError::NotFound(NotFoundError::User(_)) => ("user_not_found", None),
            ForkfulError::InvalidInput(_) => ("invalid_input", None),
            ForkfulError::Config(_) | ForkfulError::Seed(_) => ("internal", None),
        };

        Self {
            line,
            kind,
            message: error.to_string(),
            fields,
        }
    }

    fn parse(line: usize, error: &serde_json::Error) -> Self {
        Self {
            line,
            kind: "parse",
            message: format!("Invalid command: {}", error),
            fields: None,
        }
    }
}

/// Apply every command read from `input`, writing one result line per command
pub fn run<R: BufRead, W: Write>(mut store: Store, input: R, mut output: W) -> Result<SessionSummary> {
    let mut events = store.subscribe();
    let mut summary = SessionSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line_number = index + 1;
        let line = line.context("Failed to read command from stdin")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let rendered = match serde_json::from_str::<Command>(trimmed) {
            Err(e) => {
                tracing::warn!(line = line_number, error = %e, "Unparseable command");
                summary.failed += 1;
                serde_json::to_string(&ErrorLine::parse(line_number, &e))?
            }
            Ok(command) => match store.apply(command) {
                Ok(outcome) => {
                    summary.applied += 1;
                    serde_json::to_string(&outcome)?
                }
                Err(e) => {
                    tracing::warn!(line = line_number, error = %e, "Command rejected");
                    summary.failed += 1;
                    serde_json::to_string(&ErrorLine::from_store_error(line_number, &e))?
                }
            },
        };

        writeln!(output, "{}", rendered)?;
        drain_events(&mut events);
    }

    output.flush()?;
    Ok(summary)
}

fn drain_events(events: &mut EventReceiver) {
    loop {
        match events.try_recv() {
            Ok(event) => tracing::debug!(?event, "Store event"),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "Store events dropped");
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libforkful::{SeedData, StoreSettings};
    use std::io::Cursor;

    fn run_lines(input: &str) -> (SessionSummary, Vec<serde_json::Value>) {
        let store = Store::new(SeedData::builtin().unwrap(), StoreSettings::default()).unwrap();
        let mut output = Vec::new();
        let summary = run(store, Cursor::new(input.to_string()), &mut output).unwrap();

        let lines = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (summary, lines)
    }

    #[test]
    fn test_state_carries_between_lines() {
        let input = r#"{"type":"toggle_like","recipe_id":"r1"}
{"type":"toggle_like","recipe_id":"r1"}
"#;
        let (summary, lines) = run_lines(input);

        assert_eq!(summary, SessionSummary { applied: 2, failed: 0 });
        assert_eq!(lines[0]["liked"], true);
        assert_eq!(lines[0]["likes"], 343);
        assert_eq!(lines[1]["liked"], false);
        assert_eq!(lines[1]["likes"], 342);
    }

    #[test]
    fn test_errors_do_not_stop_the_session() {
        let input = r#"{"type":"toggle_save","recipe_id":"nope"}
not json
{"type":"add_comment","recipe_id":"r2","text":"  "}
{"type":"toggle_dark_mode"}
"#;
        let (summary, lines) = run_lines(input);

        assert_eq!(summary, SessionSummary { applied: 1, failed: 3 });
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["type"], "error");
        assert_eq!(lines[0]["kind"], "recipe_not_found");
        assert_eq!(lines[1]["kind"], "parse");
        assert_eq!(lines[1]["line"], 2);
        assert_eq!(lines[2]["kind"], "validation");
        assert_eq!(lines[2]["fields"]["text"], "Comment cannot be empty");
        assert_eq!(lines[3]["type"], "dark_mode");
        assert_eq!(lines[3]["enabled"], true);
    }

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        let input = "\n# like the pizza\n{\"type\":\"toggle_like\",\"recipe_id\":\"r1\"}\n   \n";
        let (summary, lines) = run_lines(input);
        assert_eq!(summary.applied, 1);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_follow_self_is_invalid_input() {
        let (_, lines) = run_lines(r#"{"type":"toggle_follow","user_id":"u1"}"#);
        assert_eq!(lines[0]["kind"], "invalid_input");
    }
}
