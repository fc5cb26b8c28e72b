//! The two workflows (content refresh, publish trigger) plus the calendar
//! refresh, wired over the capability traits and the shared store.

pub mod coordinator;
pub mod jobs;
pub mod orchestrator;
pub mod prompts;

pub use coordinator::PublishCoordinator;
pub use jobs::register_jobs;
pub use orchestrator::PipelineOrchestrator;

pub mod prelude {
    pub use crate::orchestrator::PipelineOrchestrator;
    pub use pulse_core::{PublishOutcome, Result, SummaryKind};
}
