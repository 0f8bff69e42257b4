//! Console rendering of tasks
//!
//! Human-readable only; nothing parses this output.

use crate::db::models::Task;
use std::io::{self, Write};

/// Width the title column is padded to in listings
const TITLE_WIDTH: usize = 24;

/// One listing line: `#<id> | <title> | done=<flag> | <created_at>`
pub fn format_task_line(task: &Task) -> String {
    format!(
        "#{} | {:<width$} | done={:<5} | {}",
        task.id,
        task.title,
        task.done,
        task.created_at_rfc3339(),
        width = TITLE_WIDTH
    )
}

/// Write a titled section with one line per task
pub fn write_task_list<W: Write>(out: &mut W, heading: &str, tasks: &[Task]) -> io::Result<()> {
    writeln!(out, "=== {} ===", heading)?;
    for task in tasks {
        writeln!(out, "{}", format_task_line(task))?;
    }
    Ok(())
}

/// Write the detail block for a single task
pub fn write_task_detail<W: Write>(out: &mut W, heading: &str, task: &Task) -> io::Result<()> {
    writeln!(out, "=== {} ===", heading)?;
    writeln!(out, "ID: {}", task.id)?;
    writeln!(out, "Title: {}", task.title)?;
    writeln!(out, "Done: {}", task.done)?;
    writeln!(out, "Created: {}", task.created_at_rfc3339())
}
