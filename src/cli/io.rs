//! Line I/O for the CLI
//!
//! - Input: one JSON request per line, UTF-8
//! - Output: one JSON response per line, flushed per line

use std::io::{BufRead, Write};

use super::errors::{CliError, CliResult};

/// Non-blank request lines from `input`
pub fn read_requests<R: BufRead>(input: R) -> impl Iterator<Item = CliResult<String>> {
    input
        .lines()
        .map(|line| line.map_err(CliError::from))
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
}

/// Write a raw JSON string as one line
pub fn write_json<W: Write>(output: &mut W, json_str: &str) -> CliResult<()> {
    writeln!(output, "{}", json_str)?;
    output.flush()?;
    Ok(())
}

/// Write an error response line for a CLI failure
pub fn write_error<W: Write>(output: &mut W, err: &CliError) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": err.code(),
        "message": err.to_string(),
    });
    write_json(output, &response.to_string())
}
