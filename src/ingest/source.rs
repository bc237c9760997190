//! Where photo bytes come from.

use async_trait::async_trait;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::FileId;

use crate::core::error::PipelineError;
use crate::telegram::Bot;

/// Resolves a Telegram file reference to its content.
#[async_trait]
pub trait PhotoSource: Send + Sync {
    async fn fetch(&self, file_id: &str) -> Result<Vec<u8>, PipelineError>;
}

/// Downloads photos through the Bot API (`getFile` + file download).
#[derive(Clone)]
pub struct TelegramPhotoSource {
    bot: Bot,
}

impl TelegramPhotoSource {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl PhotoSource for TelegramPhotoSource {
    async fn fetch(&self, file_id: &str) -> Result<Vec<u8>, PipelineError> {
        let file = self.bot.get_file(FileId(file_id.to_string())).await?;
        log::debug!("Resolved file {} to {} ({} bytes)", file_id, file.path, file.size);

        let mut content = Vec::with_capacity(file.size as usize);
        self.bot.download_file(&file.path, &mut content).await?;

        if content.is_empty() {
            return Err(PipelineError::Download(format!("file {} is empty", file_id)));
        }
        Ok(content)
    }
}
