//! Photo ingestion: Telegram → staging → Drive → Sheets.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use teloxide::types::ChatId;
use tokio::sync::Mutex;

use super::cell::TargetCell;
use super::session::{Advance, SessionCounter, SessionStore};
use super::source::PhotoSource;
use super::stores::{FileStore, SheetStore};
use crate::core::error::PipelineError;
use crate::core::metrics;

/// Mime type photos are uploaded with; Telegram re-encodes photos as JPEG.
const PHOTO_MIME_TYPE: &str = "image/jpeg";

/// Result of one successful ingestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingested {
    /// 1-based position of the photo in its batch
    pub position: u32,
    pub cell: TargetCell,
    pub url: String,
    pub advance: Advance,
}

impl Ingested {
    pub fn batch_complete(&self) -> bool {
        self.advance == Advance::BatchComplete
    }
}

/// Runs the ingestion steps for one photo and keeps the chat's counter.
///
/// The chat's counter is locked for the whole run and only advanced once the
/// link has been written, so a failed photo never consumes a slot.
///
/// All chats share one spreadsheet: the row lookup and the cell write run
/// under a single pipeline-wide lock so two photos never claim the same row.
#[derive(Clone)]
pub struct PhotoPipeline {
    source: Arc<dyn PhotoSource>,
    files: Arc<dyn FileStore>,
    sheet: Arc<dyn SheetStore>,
    sheet_lock: Arc<Mutex<()>>,
    sessions: SessionStore,
    staging_dir: PathBuf,
}

impl PhotoPipeline {
    pub fn new(
        source: Arc<dyn PhotoSource>,
        files: Arc<dyn FileStore>,
        sheet: Arc<dyn SheetStore>,
        sessions: SessionStore,
        staging_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            files,
            sheet,
            sheet_lock: Arc::new(Mutex::new(())),
            sessions,
            staging_dir: staging_dir.into(),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Ingests one photo for `chat_id`.
    pub async fn ingest(&self, chat_id: ChatId, file_id: &str) -> Result<Ingested, PipelineError> {
        let started = Instant::now();
        let mut session = self.sessions.lock(chat_id).await;

        let result = self.run(&session, file_id).await;
        metrics::PIPELINE_DURATION_SECONDS.observe(started.elapsed().as_secs_f64());

        match result {
            Ok((cell, url)) => {
                let position = session.current();
                let advance = session.advance();
                metrics::PHOTOS_PROCESSED_TOTAL.inc();
                if advance == Advance::BatchComplete {
                    metrics::BATCHES_COMPLETED_TOTAL.inc();
                    log::info!("Chat {} completed a batch of {} photos", chat_id, session.max_batch());
                }
                log::info!(
                    "Photo {}/{} from chat {} linked at {}",
                    position,
                    session.max_batch(),
                    chat_id,
                    cell
                );
                Ok(Ingested {
                    position,
                    cell,
                    url,
                    advance,
                })
            }
            Err(e) => {
                metrics::record_failure(e.stage());
                Err(e)
            }
        }
    }

    async fn run(&self, session: &SessionCounter, file_id: &str) -> Result<(TargetCell, String), PipelineError> {
        let content = self.source.fetch(file_id).await?;
        log::debug!("Downloaded photo {} ({} bytes)", file_id, content.len());

        let staged = self.stage(file_id, &content).await?;
        let uploaded = self.files.upload(&staged, file_id, PHOTO_MIME_TYPE).await;
        discard(&staged).await;
        let object_id = uploaded?;

        self.files.share_publicly(&object_id).await?;
        let url = self.files.public_url(&object_id);

        let column = session.next_column();
        let _sheet = self.sheet_lock.lock().await;
        let existing = self.sheet.column_values(column).await?;
        let cell = TargetCell::after_existing(column, existing.len());

        self.sheet.write_cell(cell, &url).await?;
        Ok((cell, url))
    }

    /// Writes the photo under a per-run name; the same file id may be in flight
    /// from several chats at once (forwarded photos).
    async fn stage(&self, file_id: &str, content: &[u8]) -> Result<PathBuf, PipelineError> {
        fs_err::tokio::create_dir_all(&self.staging_dir).await?;
        let path = self
            .staging_dir
            .join(format!("{}-{}.jpg", file_id, uuid::Uuid::new_v4().simple()));
        fs_err::tokio::write(&path, content).await?;
        Ok(path)
    }
}

async fn discard(path: &Path) {
    if let Err(e) = fs_err::tokio::remove_file(path).await {
        log::warn!("Failed to remove staged photo: {}", e);
    }
}
