/// Lifecycle of the scheduler's most recent job.
///
/// `Completed` and `Cancelled` hold until the next start, which passes back
/// through `Idle` before `Rendering`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderState {
    #[default]
    Idle,
    Rendering,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderProgress {
    pub completed_columns: u32,
    pub total_columns: u32,
}

impl RenderProgress {
    /// Completion in `[0, 1]`; zero before any job has been sized.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.total_columns == 0 {
            return 0.0;
        }

        (self.completed_columns.min(self.total_columns) as f32) / (self.total_columns as f32)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_columns > 0 && self.completed_columns >= self.total_columns
    }
}
