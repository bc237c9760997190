//! Command handler implementations (/start)

use teloxide::prelude::*;
use teloxide::types::Message;

use super::types::{HandlerDeps, HandlerError};
use crate::telegram::replies;
use crate::telegram::Bot;

/// Handle /start command: new batch for this chat, then usage text.
pub(super) async fn handle_start_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    deps.sessions().reset(msg.chat.id).await;

    let text = replies::start_text(deps.sessions().max_batch(), &deps.spreadsheet_link);
    bot.send_message(msg.chat.id, text).await?;

    Ok(())
}
