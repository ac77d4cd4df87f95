//! Run reporting — summary and per-file coverage tables

use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use postline_core::fmt_num;

use crate::checkpoint::ProgressState;

/// Aggregated outcome of one run (possibly a partial, resumable one).
#[derive(Debug, Default)]
pub struct RunSummary {
    pub units_completed: usize,
    pub posts_written: usize,
    pub reposts_skipped: usize,
    pub malformed_dropped: usize,
    pub files_total: usize,
    pub files_complete: usize,
    /// Shutdown was requested and the loop stopped between units.
    pub interrupted: bool,
}

impl RunSummary {
    /// Table output for TTY sessions.
    pub fn print(&self) {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![
                Cell::new("Metric").fg(Color::Cyan),
                Cell::new("Value").fg(Color::Cyan),
            ]);
        table.add_row(vec!["Units completed", &fmt_num(self.units_completed)]);
        table.add_row(vec!["Posts written", &fmt_num(self.posts_written)]);
        table.add_row(vec!["Reposts skipped", &fmt_num(self.reposts_skipped)]);
        table.add_row(vec!["Malformed dropped", &fmt_num(self.malformed_dropped)]);
        table.add_row(vec![
            "Files fully covered",
            &format!("{}/{}", self.files_complete, self.files_total),
        ]);
        eprintln!("\n{table}");
    }

    /// Log output for non-TTY sessions.
    pub fn log(&self) {
        log::info!(
            "run summary: {} units, {} posts written, {} reposts skipped, {} malformed, {}/{} files covered",
            self.units_completed,
            fmt_num(self.posts_written),
            fmt_num(self.reposts_skipped),
            self.malformed_dropped,
            self.files_complete,
            self.files_total
        );
    }
}

/// Per-file coverage table built from the checkpoint (for `status`).
pub fn coverage_table(state: &ProgressState) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("File").fg(Color::Cyan),
            Cell::new("Batches done").fg(Color::Cyan),
            Cell::new("Total").fg(Color::Cyan),
            Cell::new("State").fg(Color::Cyan),
        ]);
    for (name, fp) in &state.files {
        let done = fp.last_batch + 1;
        let complete = done >= fp.total_batches as i64;
        let status = if complete {
            Cell::new("complete").fg(Color::Green)
        } else {
            Cell::new("pending").fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(done.to_string()),
            Cell::new(fp.total_batches.to_string()),
            status,
        ]);
    }
    table
}
