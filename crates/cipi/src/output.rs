//! Writes rendered text to stdout.

use std::io::{self, Write};

/// Print the rendered output verbatim. A closed pipe (e.g. `cipi | head`)
/// is not an error.
pub fn print_output(output: &str) -> io::Result<()> {
    if output.is_empty() {
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    match stdout.write_all(output.as_bytes()).and_then(|()| stdout.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
