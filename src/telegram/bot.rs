//! Bot initialization
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation

use reqwest::ClientBuilder;
use secrecy::{ExposeSecret, SecretString};
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use super::Bot;
use crate::core::config;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Я умею:")]
pub enum Command {
    #[command(description = "начать новую серию фото")]
    Start,
}

/// Creates the Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Failed to create bot (invalid URL, client build failure)
pub fn create_bot(token: &SecretString) -> anyhow::Result<Bot> {
    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(token.expose_secret(), client);

    // Check if local Bot API server is configured
    let bot = if let Some(bot_api_url) = config::BOT_API_URL.as_deref() {
        log::info!("Using custom Bot API URL: {}", bot_api_url);
        let url = url::Url::parse(bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
        bot.set_api_url(url)
    } else {
        bot
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}
