//! Resumption-matrix traversal
//!
//! Work is a matrix: rows are round indices, columns are identifier files
//! in sorted order. Cell `(round, file)` is a work unit when
//! `round < total_batches(file)`. The cursor walks the matrix row-major
//! and resumes mid-row after a restart using the checkpoint's
//! `resume_file_index`; completed cells (`last_batch >= round`) are never
//! re-issued.

use crate::checkpoint::ProgressState;
use crate::source::IdentifierSource;

/// One batch-sized slice of one file's identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkUnit {
    pub file_index: usize,
    pub file_name: String,
    pub round_index: u32,
}

/// Computes the next `(file, round)` unit from checkpoint + file list.
#[derive(Debug)]
pub struct BatchCursor {
    /// (file name, total batches) in discovery order.
    columns: Vec<(String, u64)>,
    round_limit: u32,
}

impl BatchCursor {
    pub fn new(source: &IdentifierSource, round_limit: u32) -> Self {
        let columns = source
            .files()
            .iter()
            .map(|f| (f.name.clone(), f.total_batches(source.batch_size())))
            .collect();
        Self {
            columns,
            round_limit,
        }
    }

    /// Next unit of work, or `None` when the matrix is exhausted for the
    /// round limit. Never fails.
    ///
    /// Claiming a unit advances `resume_file_index` in memory immediately,
    /// so the in-process scan moves forward; the checkpoint is only
    /// persisted after the unit completes, which is what makes a crash
    /// mid-unit redo exactly that unit and nothing earlier.
    pub fn next(&self, state: &mut ProgressState) -> Option<WorkUnit> {
        while state.round_index < self.round_limit {
            let round = state.round_index;
            let start = (state.resume_file_index + 1).max(0) as usize;

            for (idx, (name, total_batches)) in self.columns.iter().enumerate().skip(start) {
                // File exhausted in an earlier round
                if round as u64 >= *total_batches {
                    continue;
                }
                // Cell already completed (resume safety for partial rounds)
                let last_batch = state.files.get(name).map_or(-1, |fp| fp.last_batch);
                if last_batch >= round as i64 {
                    continue;
                }

                // Reaching the last column wraps the scan to the row start
                state.resume_file_index = if idx + 1 == self.columns.len() {
                    -1
                } else {
                    idx as i64
                };
                return Some(WorkUnit {
                    file_index: idx,
                    file_name: name.clone(),
                    round_index: round,
                });
            }

            // Row exhausted: advance to the next round
            state.round_index += 1;
            state.resume_file_index = -1;
        }
        None
    }
}
