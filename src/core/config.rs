use lazy_regex::regex_captures;
use once_cell::sync::Lazy;
use secrecy::SecretString;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::error::ConfigError;

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: photosheet.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "photosheet.log".to_string()));

/// Custom Bot API server URL (local telegram-bot-api), if any
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| non_empty_var("BOT_API_URL"));

/// Fallback spreadsheet when neither SPREADSHEET_ID nor SPREADSHEET_URL is set
pub const DEFAULT_SPREADSHEET_ID: &str = "1NyzGqlL4X3GMKUdElMpXOS00DN6230zGq_zpxfFmEjU";

/// Batch configuration
pub mod batch {
    /// Photos per batch before the counter wraps
    pub const DEFAULT_MAX_PHOTOS: u32 = 21;

    /// First data row; row 1 holds the header
    pub const FIRST_DATA_ROW: u32 = 2;

    /// Local folder for downloaded photos awaiting upload
    pub const DEFAULT_STAGING_DIR: &str = "photos";
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Telegram and Google HTTP requests (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 120;

    /// Default listen port (hosting platforms override it with PORT)
    pub const DEFAULT_PORT: u16 = 5000;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Metrics and monitoring configuration
pub mod metrics {
    use once_cell::sync::Lazy;
    use std::env;

    /// Serve /health and /metrics in polling mode
    /// Read from METRICS_ENABLED environment variable
    /// Default: true
    pub static ENABLED: Lazy<bool> = Lazy::new(|| {
        env::var("METRICS_ENABLED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true)
    });
}

/// How updates reach the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeliveryMode {
    /// Long polling via getUpdates
    Polling,
    /// Telegram pushes updates to WEBHOOK_URL
    Webhook,
}

/// Settings validated once at startup.
///
/// Anything missing here aborts the process before the bot starts.
#[derive(Debug)]
pub struct Settings {
    pub bot_token: SecretString,
    pub google_credentials: SecretString,
    pub spreadsheet_id: String,
    pub mode: DeliveryMode,
    pub webhook_url: Option<url::Url>,
    pub listen_addr: SocketAddr,
    pub max_batch: u32,
    pub staging_dir: PathBuf,
}

impl Settings {
    /// Reads and validates all settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`Settings::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bot_token = get("TELEGRAM_TOKEN")
            .or_else(|| get("BOT_TOKEN"))
            .or_else(|| get("TELOXIDE_TOKEN"))
            .ok_or(ConfigError::Missing("TELEGRAM_TOKEN"))?;

        let google_credentials = get("GOOGLE_CREDS_JSON").ok_or(ConfigError::Missing("GOOGLE_CREDS_JSON"))?;

        let spreadsheet_id = match (get("SPREADSHEET_ID"), get("SPREADSHEET_URL")) {
            (Some(id), _) => id,
            (None, Some(url)) => spreadsheet_id_from_url(&url).ok_or_else(|| ConfigError::Invalid {
                name: "SPREADSHEET_URL",
                reason: format!("no spreadsheet id in {}", url),
            })?,
            (None, None) => DEFAULT_SPREADSHEET_ID.to_string(),
        };

        let mode = match get("BOT_MODE") {
            Some(raw) => raw.parse::<DeliveryMode>().map_err(|_| ConfigError::Invalid {
                name: "BOT_MODE",
                reason: format!("expected 'webhook' or 'polling', got '{}'", raw),
            })?,
            None => DeliveryMode::Polling,
        };

        let webhook_url = get("WEBHOOK_URL")
            .map(|raw| {
                url::Url::parse(&raw).map_err(|e| ConfigError::Invalid {
                    name: "WEBHOOK_URL",
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        let port = parse_or("PORT", get("PORT"), network::DEFAULT_PORT)?;
        let max_batch = parse_or("MAX_BATCH_PHOTOS", get("MAX_BATCH_PHOTOS"), batch::DEFAULT_MAX_PHOTOS)?;
        if max_batch == 0 {
            return Err(ConfigError::Invalid {
                name: "MAX_BATCH_PHOTOS",
                reason: "must be at least 1".to_string(),
            });
        }

        let staging_dir = PathBuf::from(get("STAGING_DIR").unwrap_or_else(|| batch::DEFAULT_STAGING_DIR.to_string()));

        Ok(Self {
            bot_token: SecretString::from(bot_token),
            google_credentials: SecretString::from(google_credentials),
            spreadsheet_id,
            mode,
            webhook_url,
            listen_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            max_batch,
            staging_dir,
        })
    }

    /// Webhook URL for the given mode; webhook mode without one is a config error.
    pub fn webhook_url_for(&self, mode: DeliveryMode) -> Result<Option<url::Url>, ConfigError> {
        match mode {
            DeliveryMode::Polling => Ok(None),
            DeliveryMode::Webhook => self
                .webhook_url
                .clone()
                .map(Some)
                .ok_or(ConfigError::Missing("WEBHOOK_URL")),
        }
    }

    /// Link shown to users on /start
    pub fn spreadsheet_link(&self) -> String {
        format!("https://docs.google.com/spreadsheets/d/{}", self.spreadsheet_id)
    }
}

/// Extracts the spreadsheet id from a Google Sheets URL
/// (`https://docs.google.com/spreadsheets/d/{id}/edit#gid=0`).
pub fn spreadsheet_id_from_url(url: &str) -> Option<String> {
    regex_captures!(r"/spreadsheets/d/([a-zA-Z0-9_-]+)", url).map(|(_, id)| id.to_string())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_or<T: std::str::FromStr>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
