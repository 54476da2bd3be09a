use std::sync::Arc;

use crate::config::Config;
use crate::resume::acquire::DocumentConverter;
use crate::resume::fields::NumberingPlan;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data: every upload is processed independently.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable word-processing converter. Default: DocxConverter.
    pub converter: Arc<dyn DocumentConverter>,
}

impl AppState {
    pub fn numbering_plan(&self) -> NumberingPlan {
        self.config.numbering_plan
    }
}
