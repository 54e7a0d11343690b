/// Batch processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug)]
pub enum BatchStage {
    Loading,
    Tiling,
    Classifying,
    Reporting,
}

impl std::fmt::Display for BatchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "Loading images"),
            Self::Tiling => write!(f, "Exporting tiles"),
            Self::Classifying => write!(f, "Counting seeds"),
            Self::Reporting => write!(f, "Writing report"),
        }
    }
}

/// Thread-safe progress reporting for the batch pass.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items in
    /// this stage (e.g., image count), if known.
    fn begin_stage(&self, _stage: BatchStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_batch_silent` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
