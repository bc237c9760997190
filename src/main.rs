use anyhow::Result;
use secrecy::ExposeSecret;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::update_listeners::{webhooks, Polling};

use photosheet::cli::{Cli, Commands};
use photosheet::core::{config, init_logger, metrics, metrics_server, DeliveryMode, Settings};
use photosheet::google::{DriveClient, GoogleClient, ServiceAccountTokens, SheetsClient};
use photosheet::ingest::{PhotoPipeline, SessionStore, TelegramPhotoSource};
use photosheet::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point for the Telegram bot
///
/// # Errors
/// Returns an error if startup fails (logging, configuration, credentials,
/// Bot API connection). Errors after startup are handled per update.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenvy::dotenv();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    let mode_override = match cli.command {
        Some(Commands::Run { webhook: true }) => Some(DeliveryMode::Webhook),
        Some(Commands::Run { webhook: false }) | None => None,
    };

    run_bot(mode_override).await
}

async fn run_bot(mode_override: Option<DeliveryMode>) -> Result<()> {
    let bot_init_start = std::time::Instant::now();
    log::info!("Starting bot...");

    let settings = Settings::from_env()?;
    let mode = mode_override.unwrap_or(settings.mode);
    let webhook_url = settings.webhook_url_for(mode)?;
    log::info!(
        "Spreadsheet: {}, batch size: {}, staging dir: {}",
        settings.spreadsheet_id,
        settings.max_batch,
        settings.staging_dir.display()
    );

    metrics::init_metrics();

    let tokens = ServiceAccountTokens::from_json(settings.google_credentials.expose_secret())?;
    let google = GoogleClient::new(Arc::new(tokens))?;
    log::info!("Google service account loaded");

    let bot = create_bot(&settings.bot_token)?;
    let me = bot.get_me().await?;
    log::info!("Bot username: {:?}, Bot ID: {}", me.username, me.id);

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let pipeline = PhotoPipeline::new(
        Arc::new(TelegramPhotoSource::new(bot.clone())),
        Arc::new(DriveClient::new(google.clone())),
        Arc::new(SheetsClient::new(google, settings.spreadsheet_id.clone())),
        SessionStore::new(settings.max_batch),
        settings.staging_dir.clone(),
    );
    let handler_deps = HandlerDeps::new(Arc::new(pipeline), settings.spreadsheet_link());

    let mut dispatcher = Dispatcher::builder(bot.clone(), schema(handler_deps))
        .enable_ctrlc_handler()
        .build();

    match webhook_url {
        Some(url) => {
            log::info!("Starting bot in webhook mode at {}", url);

            let options = webhooks::Options::new(settings.listen_addr, url);
            let (listener, stop_flag, router) = webhooks::axum_to_router(bot.clone(), options).await?;
            let app = metrics_server::merge_into(router, *config::metrics::ENABLED);
            if !*config::metrics::ENABLED {
                log::info!("Metrics routes disabled (METRICS_ENABLED=false)");
            }

            let tcp_listener = tokio::net::TcpListener::bind(settings.listen_addr).await?;
            log::info!("Listening on http://{}", settings.listen_addr);
            tokio::spawn(async move {
                if let Err(e) = axum::serve(tcp_listener, app).with_graceful_shutdown(stop_flag).await {
                    log::error!("Webhook server error: {}", e);
                }
            });

            log::info!("🎉 Bot initialization complete in {:.2}s", bot_init_start.elapsed().as_secs_f64());
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the webhook listener"),
                )
                .await;
        }
        None => {
            if *config::metrics::ENABLED {
                let addr = settings.listen_addr;
                tokio::spawn(async move {
                    if let Err(e) = metrics_server::start_metrics_server(addr).await {
                        log::error!("Metrics server error: {}", e);
                    }
                });
            } else {
                log::info!("Metrics server disabled (METRICS_ENABLED=false)");
            }

            log::info!("Starting bot in long polling mode");
            log::info!("🎉 Bot initialization complete in {:.2}s", bot_init_start.elapsed().as_secs_f64());

            // Create polling listener that drops pending updates on start
            let listener = Polling::builder(bot.clone()).drop_pending_updates().build();
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
    }

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}
