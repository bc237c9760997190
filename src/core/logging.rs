//! Logging setup: terminal plus a log file, both at `Info`.

use anyhow::{Context, Result};
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

/// Installs the global logger. Call once, before anything logs.
///
/// Fails if the log file cannot be created or a logger is already installed.
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = fs_err::File::create(log_file_path).context("Failed to create log file")?;

    let loggers: Vec<Box<dyn SharedLogger>> = vec![
        TermLogger::new(LevelFilter::Info, Config::default(), TerminalMode::Mixed, ColorChoice::Auto),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ];

    CombinedLogger::init(loggers).context("Failed to initialize logger")
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn test_init_logger_creates_log_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photosheet.log");

        // A second init in the same process fails; the file is created either way.
        let _ = init_logger(path.to_str().unwrap());

        assert!(path.exists());
    }

    #[test]
    fn test_init_logger_rejects_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("photosheet.log");

        assert!(init_logger(path.to_str().unwrap()).is_err());
    }
}
