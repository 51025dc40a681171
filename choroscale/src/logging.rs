//! Logging configuration for choroscale.
//!
//! Classification runs inside map-serving request paths, so everything logs
//! through `tracing` spans and events; the host application picks the
//! subscriber. This module provides a small setup helper for binaries and
//! tests that want a sensible default.

use tracing::Level;

/// Configuration for choroscale's logging setup.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Base log level for the application.
    pub level: Level,
    /// Log level for choroscale targets specifically.
    pub engine_level: Level,
    /// Whether to use JSON output format.
    pub json_format: bool,
    /// Environment filter override. When set, the levels above are ignored.
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            engine_level: Level::DEBUG,
            json_format: false,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Quiet JSON output for production services.
    pub fn production() -> Self {
        Self {
            level: Level::WARN,
            engine_level: Level::INFO,
            json_format: true,
            env_filter: None,
        }
    }

    /// Chatty plain-text output for local development.
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            engine_level: Level::DEBUG,
            json_format: false,
            env_filter: None,
        }
    }

    /// Sets the base log level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the log level for choroscale targets.
    pub fn with_engine_level(mut self, level: Level) -> Self {
        self.engine_level = level;
        self
    }

    /// Sets whether to use JSON output format.
    pub fn with_json_format(mut self, enabled: bool) -> Self {
        self.json_format = enabled;
        self
    }

    /// Sets a custom environment filter.
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Builds the environment filter string.
    pub fn env_filter(&self) -> String {
        if let Some(ref filter) = self.env_filter {
            filter.clone()
        } else {
            format!(
                "{},choroscale={}",
                self.level.as_str().to_lowercase(),
                self.engine_level.as_str().to_lowercase()
            )
        }
    }
}

/// Initializes a global `tracing` subscriber.
///
/// A `RUST_LOG` environment filter wins when present; otherwise the
/// config's filter applies.
///
/// # Examples
///
/// ```rust,no_run
/// use choroscale::logging::{init_logging, LoggingConfig};
///
/// init_logging(LoggingConfig::default()).unwrap();
/// ```
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

    let fmt_layer = if config.json_format {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
