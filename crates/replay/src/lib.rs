//! Batch replay of ledger commands.
//!
//! Input is JSON lines, one [`LedgerCommand`] per line; blank lines and lines
//! starting with `#` are skipped. Output is one JSON record per command.
//! A failing command is reported in its record and never stops the run.

use std::io::{BufRead, Write};

use anyhow::Context;
use serde::Serialize;

use bankledger_banking::{CommandOutcome, Ledger, LedgerCommand};

/// One output line.
#[derive(Debug, Serialize)]
pub struct ReplayRecord<'a> {
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok: Option<&'a CommandOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Counts for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub succeeded: usize,
    pub failed: usize,
    pub malformed: usize,
}

/// Execute every command from `input` against `ledger`, writing results to `output`.
///
/// Only IO failures are returned as errors.
pub fn replay<R: BufRead, W: Write>(
    ledger: &mut Ledger,
    mut input: R,
    mut output: W,
) -> anyhow::Result<ReplayStats> {
    let mut stats = ReplayStats::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("failed to read input line {}", line_no + 1))?;
        if read == 0 {
            break;
        }
        line_no += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "line is not valid UTF-8");
                stats.malformed += 1;
                write_parse_error(&mut output, line_no, e.to_string())?;
                continue;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let command: LedgerCommand = match serde_json::from_str(trimmed) {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "malformed command");
                stats.malformed += 1;
                write_parse_error(&mut output, line_no, e.to_string())?;
                continue;
            }
        };

        let record = match ledger.execute(&command) {
            Ok(outcome) => {
                stats.succeeded += 1;
                write_record(
                    &mut output,
                    &ReplayRecord {
                        line: line_no,
                        op: Some(command.name()),
                        ok: Some(&outcome),
                        error: None,
                        message: None,
                    },
                )
            }
            Err(e) => {
                stats.failed += 1;
                write_record(
                    &mut output,
                    &ReplayRecord {
                        line: line_no,
                        op: Some(command.name()),
                        ok: None,
                        error: Some(e.code()),
                        message: Some(e.to_string()),
                    },
                )
            }
        };
        record?;
    }

    output.flush().context("failed to flush output")?;
    Ok(stats)
}

fn write_parse_error<W: Write>(output: &mut W, line: usize, message: String) -> anyhow::Result<()> {
    write_record(
        output,
        &ReplayRecord {
            line,
            op: None,
            ok: None,
            error: Some("parse_error"),
            message: Some(message),
        },
    )
}

fn write_record<W: Write>(output: &mut W, record: &ReplayRecord<'_>) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *output, record).context("failed to write record")?;
    output.write_all(b"\n").context("failed to write record")?;
    Ok(())
}
