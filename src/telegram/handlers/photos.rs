//! Photo message handler

use teloxide::prelude::*;
use teloxide::types::Message;

use super::types::{HandlerDeps, HandlerError};
use crate::telegram::replies;
use crate::telegram::Bot;

/// Runs the ingestion pipeline for the largest size of the photo.
///
/// Pipeline failures are logged with their stage and answered with the one
/// generic failure reply; only Telegram errors while replying escape.
pub(super) async fn handle_photo(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let Some(photo) = msg
        .photo()
        .and_then(|sizes| sizes.iter().max_by_key(|p| u64::from(p.width) * u64::from(p.height)))
    else {
        return Ok(());
    };

    let chat_id = msg.chat.id;
    let file_id = &photo.file.id.0;
    log::info!(
        "📷 Photo {}x{} from chat {} (file {})",
        photo.width,
        photo.height,
        chat_id,
        file_id
    );

    match deps.pipeline.ingest(chat_id, file_id).await {
        Ok(ingested) => {
            let text = replies::photo_reply(&ingested, deps.sessions().max_batch());
            bot.send_message(chat_id, text).await?;
        }
        Err(e) => {
            log::error!("❌ Photo ingestion failed at {} for chat {}: {}", e.stage(), chat_id, e);
            bot.send_message(chat_id, replies::PROCESSING_FAILED).await?;
        }
    }

    Ok(())
}
