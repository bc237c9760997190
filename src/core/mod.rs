//! Core utilities, configuration, and common functionality

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod metrics_server;

// Re-exports for convenience
pub use config::{DeliveryMode, Settings};
pub use error::{AppError, ConfigError, PipelineError};
pub use logging::init_logger;
