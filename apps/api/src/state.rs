use std::sync::Arc;

use crate::config::Config;
use crate::extraction::ResumeExtractor;
use crate::storage::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Compiled once at startup; read-only afterwards.
    pub extractor: Arc<ResumeExtractor>,
    /// Archive for original uploads. `DisabledStore` when S3 is not configured.
    pub store: Arc<dyn ResumeStore>,
}
