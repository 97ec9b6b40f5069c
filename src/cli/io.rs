//! JSON output for one-shot commands
//!
//! Results go to stdout as a single JSON object; logs go to stderr.

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Write a success response to stdout
pub fn write_response<T: Serialize>(data: &T) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
