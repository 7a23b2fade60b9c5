//! Runs a command script line by line against a [`Session`].
//!
//! Besides the session commands a script may contain `time` and `untime`,
//! which switch wall-clock timing of `solve` lines on and off.

use std::io::{BufRead, Write};
use std::time::Instant;

use tracing::warn;

use crate::error::{Error, Result};
use crate::session::Session;

/// Printed after every command that is not a timed solve.
pub const SEPARATOR: &str = "----------------------------------";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub executed: usize,
    pub failed: usize,
}

/// Executes every line of `input`. A failing command is reported to `out`
/// and the script carries on; only I/O errors stop it.
pub fn run(session: &mut Session, input: impl BufRead, out: &mut impl Write) -> Result<Summary> {
    let mut summary = Summary::default();
    let mut timed = false;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let keyword = line
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match keyword.as_str() {
            "" => continue,
            k if k.starts_with('#') => continue,
            "time" => {
                timed = true;
                continue;
            }
            "untime" => {
                timed = false;
                continue;
            }
            _ => {}
        }

        let started = Instant::now();
        match session.execute(line, out) {
            Ok(()) => summary.executed += 1,
            Err(Error::Io(e)) => return Err(Error::Io(e)),
            Err(e) => {
                summary.failed += 1;
                warn!(line = index + 1, error = %e, "command failed");
                writeln!(out, "Error: {}", e)?;
            }
        }

        if timed && keyword == "solve" {
            writeln!(out, "--- {} seconds ---", started.elapsed().as_secs_f64())?;
        } else {
            writeln!(out, "{}", SEPARATOR)?;
        }
    }

    Ok(summary)
}
