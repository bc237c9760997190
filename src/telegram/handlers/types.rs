//! Handler types and dependencies

use std::sync::Arc;

use crate::ingest::{PhotoPipeline, SessionStore};

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub pipeline: Arc<PhotoPipeline>,
    pub spreadsheet_link: String,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(pipeline: Arc<PhotoPipeline>, spreadsheet_link: impl Into<String>) -> Self {
        Self {
            pipeline,
            spreadsheet_link: spreadsheet_link.into(),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        self.pipeline.sessions()
    }
}
