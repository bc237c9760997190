use thiserror::Error;

/// Startup-time errors for the application.
///
/// Everything here is fatal: `main` propagates it and the process exits.
/// Per-photo failures use [`PipelineError`] instead and never reach `main`.
///
/// # Example
///
/// ```no_run
/// use photosheet::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed environment configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Service-account credentials could not be turned into a token provider
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

/// A required environment value is absent or cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Failure of a single photo ingestion step.
///
/// Each variant names the step that failed. The handler logs the variant and
/// its detail, then answers the user with one generic message regardless of
/// which step it was.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Telegram file could not be resolved or downloaded
    #[error("download failed: {0}")]
    Download(String),

    /// Local staging file could not be written
    #[error("staging failed: {0}")]
    Staging(#[from] std::io::Error),

    /// Drive upload failed
    #[error("upload failed: {0}")]
    Upload(String),

    /// Drive refused to make the file public
    #[error("permission failed: {0}")]
    Permission(String),

    /// Sheets read or write failed
    #[error("spreadsheet failed: {0}")]
    Spreadsheet(String),
}

impl PipelineError {
    /// Returns the failed stage name, used as a metrics label
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Download(_) => "download",
            PipelineError::Staging(_) => "staging",
            PipelineError::Upload(_) => "upload",
            PipelineError::Permission(_) => "permission",
            PipelineError::Spreadsheet(_) => "spreadsheet",
        }
    }
}

impl From<teloxide::RequestError> for PipelineError {
    fn from(err: teloxide::RequestError) -> Self {
        PipelineError::Download(err.to_string())
    }
}

impl From<teloxide::DownloadError> for PipelineError {
    fn from(err: teloxide::DownloadError) -> Self {
        PipelineError::Download(err.to_string())
    }
}
