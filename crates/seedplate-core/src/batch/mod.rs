pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{run_batch, run_batch_silent, BatchSummary};
pub use types::{BatchStage, ProgressReporter};
