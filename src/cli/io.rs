//! Console I/O for the CLI
//!
//! Prompted line input for the REPL and result printing for both
//! commands. Output format is a contract: one row per match, then the
//! count line, then the elapsed-milliseconds line.

use std::io::{BufRead, Write};

use crate::search::SearchOutcome;

use super::errors::CliResult;

/// Print `prompt` without a newline and read one line.
///
/// Returns `None` on end of input. The line comes back trimmed of the
/// trailing newline only; interior whitespace is the user's.
pub fn prompt_line(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt: &str,
) -> CliResult<Option<String>> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Some(line))
}

/// Print one search outcome: rows, count, elapsed time.
pub fn write_outcome(output: &mut impl Write, outcome: &SearchOutcome) -> CliResult<()> {
    for row in &outcome.rows {
        writeln!(output, "{}", row)?;
    }
    writeln!(output, "Rows found: {}", outcome.count())?;
    writeln!(output, "Search time: {} ms", outcome.elapsed_ms())?;
    output.flush()?;
    Ok(())
}

/// Print the distinct no-such-prefix report.
pub fn write_no_prefix(output: &mut impl Write, prefix: &str) -> CliResult<()> {
    writeln!(output, "No rows match prefix '{}'", prefix)?;
    output.flush()?;
    Ok(())
}
