//! Outbound collaborators of the ingestion pipeline.

use std::path::Path;

use async_trait::async_trait;

use super::cell::{Column, TargetCell};
use crate::core::error::PipelineError;

/// Cloud file storage that can publish uploaded files.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Uploads a local file and returns the storage object id.
    async fn upload(&self, path: &Path, name: &str, mime_type: &str) -> Result<String, PipelineError>;

    /// Grants anyone-with-the-link read access to the object.
    async fn share_publicly(&self, object_id: &str) -> Result<(), PipelineError>;

    /// Public URL for a shared object.
    fn public_url(&self, object_id: &str) -> String;
}

/// Spreadsheet holding the photo links.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Values of `column` from the first data row down to its last used row.
    ///
    /// Blank cells in the middle come back as empty strings, so the length is
    /// the number of occupied rows below the header.
    async fn column_values(&self, column: Column) -> Result<Vec<String>, PipelineError>;

    /// Writes a raw (unparsed) value into one cell.
    async fn write_cell(&self, cell: TargetCell, value: &str) -> Result<(), PipelineError>;
}
