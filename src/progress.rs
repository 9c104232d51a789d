// src/progress.rs
/// Progress reporting for batch extraction.
/// Frontends implement this to surface status; every call happens on the
/// thread that started the batch.
pub trait Progress {
    /// Called at the start with the number of rows.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One row became a record. `row` is its position in the table body.
    fn item_done(&mut self, _row: usize) {}

    /// One row was skipped.
    fn item_failed(&mut self, _row: usize, _reason: &str) {}

    /// Called at the end.
    fn finish(&mut self) {}
}

/// Counts outcomes; handy for summaries and tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tally {
    pub total: usize,
    pub done: usize,
    pub failed: usize,
    pub finished: bool,
}

impl Progress for Tally {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn item_done(&mut self, _row: usize) {
        self.done += 1;
    }
    fn item_failed(&mut self, _row: usize, _reason: &str) {
        self.failed += 1;
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}
