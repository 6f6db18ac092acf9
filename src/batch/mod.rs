/// Per-item lifecycle
mod state;
pub use state::{ItemState, ItemTracker, Phase};

/// Aggregate outcome of a run
mod result;
pub use result::{BatchResult, FailureRecord};

/// Drives every item through resolution, rendering and submission
mod orchestrator;
pub use orchestrator::BatchOrchestrator;
