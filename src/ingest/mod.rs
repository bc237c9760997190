//! Photo ingestion: per-chat counters, target cells and the upload pipeline

pub mod cell;
pub mod pipeline;
pub mod session;
pub mod source;
pub mod stores;

pub use cell::{Column, TargetCell};
pub use pipeline::{Ingested, PhotoPipeline};
pub use session::{Advance, SessionCounter, SessionStore};
pub use source::{PhotoSource, TelegramPhotoSource};
pub use stores::{FileStore, SheetStore};
