//! Render-pass progress reporting.

/// Receives progress from a running render pass.
///
/// Called from worker threads, so implementations must be `Sync`.
pub trait ProgressListener: Sync {
    /// The pass split the image into `num_tasks` row bands.
    fn on_started(&self, num_tasks: usize);

    /// Task `task` finished rows `first_row..=last_row`.
    fn on_lines_computed(&self, task: usize, first_row: u32, last_row: u32);

    /// All tasks have returned.
    fn on_stopped(&self, cancelled: bool);
}

/// Listener that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressListener for NoProgress {
    fn on_started(&self, _num_tasks: usize) {}

    fn on_lines_computed(&self, _task: usize, _first_row: u32, _last_row: u32) {}

    fn on_stopped(&self, _cancelled: bool) {}
}
