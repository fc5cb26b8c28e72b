use std::sync::Arc;

use pulse_pipeline::PipelineOrchestrator;
use pulse_storage::ArticleStore;

pub struct AppState {
    pub orchestrator: Arc<PipelineOrchestrator>,
    pub store: Arc<ArticleStore>,
}
