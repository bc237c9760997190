//! Fake collaborators with failure injection

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use photosheet::google::public_view_url;
use photosheet::ingest::{Column, FileStore, PhotoPipeline, PhotoSource, SessionStore, SheetStore, TargetCell};
use photosheet::PipelineError;
use tempfile::TempDir;

/// Serves fixed JPEG-ish bytes for any file id.
#[derive(Default)]
pub struct FakeSource {
    pub fail: Mutex<bool>,
    pub fetched: Mutex<Vec<String>>,
}

#[async_trait]
impl PhotoSource for FakeSource {
    async fn fetch(&self, file_id: &str) -> Result<Vec<u8>, PipelineError> {
        if *self.fail.lock().unwrap() {
            return Err(PipelineError::Download(format!("file {} is gone", file_id)));
        }
        self.fetched.lock().unwrap().push(file_id.to_string());
        Ok(format!("\u{ff}\u{d8}photo:{}", file_id).into_bytes())
    }
}

/// Records uploads; each upload gets id `drive-{n}`.
#[derive(Default)]
pub struct FakeDrive {
    pub fail_upload: Mutex<bool>,
    pub fail_permission: Mutex<bool>,
    pub uploads: Mutex<Vec<(String, Vec<u8>)>>,
    pub shared: Mutex<Vec<String>>,
    /// Delays applied to successive uploads before the staged file is read
    pub upload_delays: Mutex<VecDeque<Duration>>,
    counter: AtomicUsize,
}

#[async_trait]
impl FileStore for FakeDrive {
    async fn upload(&self, path: &Path, name: &str, _mime_type: &str) -> Result<String, PipelineError> {
        if *self.fail_upload.lock().unwrap() {
            return Err(PipelineError::Upload("HTTP 503: backend error".to_string()));
        }
        let delay = self.upload_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let content = std::fs::read(path)?;
        self.uploads.lock().unwrap().push((name.to_string(), content));
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("drive-{}", n))
    }

    async fn share_publicly(&self, object_id: &str) -> Result<(), PipelineError> {
        if *self.fail_permission.lock().unwrap() {
            return Err(PipelineError::Permission("HTTP 403: insufficient permissions".to_string()));
        }
        self.shared.lock().unwrap().push(object_id.to_string());
        Ok(())
    }

    fn public_url(&self, object_id: &str) -> String {
        public_view_url(object_id)
    }
}

/// Spreadsheet held in memory: column → rows from row 2 down.
#[derive(Default)]
pub struct FakeSheet {
    pub fail_read: Mutex<bool>,
    pub fail_write: Mutex<bool>,
    /// Latency of every column read
    pub read_delay: Mutex<Option<Duration>>,
    pub columns: Mutex<HashMap<Column, Vec<String>>>,
    pub writes: Mutex<Vec<(TargetCell, String)>>,
}

impl FakeSheet {
    /// Pre-fills `column` with `count` values
    pub fn prefill(&self, column: Column, count: usize) {
        let values = (0..count).map(|i| format!("existing-{}", i)).collect();
        self.columns.lock().unwrap().insert(column, values);
    }

    /// Cell value in A1 terms, if any
    pub fn cell(&self, column: Column, row: u32) -> Option<String> {
        let columns = self.columns.lock().unwrap();
        let index = row.checked_sub(2)? as usize;
        columns.get(&column)?.get(index).cloned().filter(|v| !v.is_empty())
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

#[async_trait]
impl SheetStore for FakeSheet {
    async fn column_values(&self, column: Column) -> Result<Vec<String>, PipelineError> {
        if *self.fail_read.lock().unwrap() {
            return Err(PipelineError::Spreadsheet("HTTP 500: read failed".to_string()));
        }
        let values = self.columns.lock().unwrap().get(&column).cloned().unwrap_or_default();
        let delay = *self.read_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(values)
    }

    async fn write_cell(&self, cell: TargetCell, value: &str) -> Result<(), PipelineError> {
        if *self.fail_write.lock().unwrap() {
            return Err(PipelineError::Spreadsheet("HTTP 500: write failed".to_string()));
        }
        let mut columns = self.columns.lock().unwrap();
        let rows = columns.entry(cell.column).or_default();
        let index = (cell.row - 2) as usize;
        if rows.len() <= index {
            rows.resize(index + 1, String::new());
        }
        rows[index] = value.to_string();
        self.writes.lock().unwrap().push((cell, value.to_string()));
        Ok(())
    }
}

/// A pipeline wired to fakes, staging into a temporary directory.
pub struct TestPipeline {
    pub pipeline: Arc<PhotoPipeline>,
    pub source: Arc<FakeSource>,
    pub drive: Arc<FakeDrive>,
    pub sheet: Arc<FakeSheet>,
    pub staging: TempDir,
}

impl TestPipeline {
    pub fn new(max_batch: u32) -> Self {
        Self::with_staging(max_batch, |root| root.join("photos"))
    }

    /// Like [`TestPipeline::new`], with the staging directory chosen under the temp root.
    pub fn with_staging(max_batch: u32, staging_dir: impl FnOnce(&Path) -> PathBuf) -> Self {
        let source = Arc::new(FakeSource::default());
        let drive = Arc::new(FakeDrive::default());
        let sheet = Arc::new(FakeSheet::default());
        let staging = TempDir::new().unwrap();

        let pipeline = PhotoPipeline::new(
            source.clone(),
            drive.clone(),
            sheet.clone(),
            SessionStore::new(max_batch),
            staging_dir(staging.path()),
        );

        Self {
            pipeline: Arc::new(pipeline),
            source,
            drive,
            sheet,
            staging,
        }
    }

    pub fn staged_files(&self) -> usize {
        std::fs::read_dir(self.staging.path().join("photos"))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}
