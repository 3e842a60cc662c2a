use std::sync::Arc;

use crate::analysis::orchestrator::Analyzer;
use crate::config::Config;
use crate::extraction::ExtractionPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Provider-or-baseline analysis. The provider client is built once in `main`.
    pub analyzer: Arc<Analyzer>,
    pub extractor: Arc<ExtractionPipeline>,
}
