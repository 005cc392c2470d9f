//! # Logging & Tracing Infrastructure
//!
//! Configures the `tracing-subscriber` stack used across the workspace.
//!
//! ## Overview
//!
//! Supports pretty, JSON, and compact output with `EnvFilter`-based
//! module-level filtering. The default filter keeps workspace crates at the
//! configured level while silencing chatty dependencies.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
//!
//! let config = LoggingConfig::default()
//!     .with_format(LogFormat::Pretty)
//!     .with_level(tracing::Level::DEBUG);
//!
//! init_logging(config).expect("Failed to initialize logging");
//! tracing::info!("player starting");
//! ```

use crate::error::{Error, Result};
use tracing::Level;
use tracing_subscriber::{filter::EnvFilter, fmt};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors
    Pretty,
    /// Structured JSON format for machine parsing
    Json,
    /// Compact format for production
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Json;
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Minimum log level
    pub level: Level,
    /// Custom filter string (e.g., "core_player=debug,renderer_hls=trace")
    pub filter: Option<String>,
    /// Display target module in logs
    pub display_target: bool,
    /// Display thread info
    pub display_thread_info: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: Level::INFO,
            filter: None,
            display_target: true,
            display_thread_info: false,
        }
    }
}

impl LoggingConfig {
    /// Set log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set minimum log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set custom filter string
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Enable or disable target display
    pub fn with_target(mut self, display: bool) -> Self {
        self.display_target = display;
        self
    }

    /// Enable or disable thread info
    pub fn with_thread_info(mut self, display: bool) -> Self {
        self.display_thread_info = display;
        self
    }
}

/// Initialize the logging system.
///
/// This should be called once during application startup.
///
/// # Errors
///
/// Returns an error if logging is already initialized or the filter string
/// is invalid.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = build_filter(&config)?;

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(config.display_target)
        .with_thread_names(config.display_thread_info)
        .with_thread_ids(config.display_thread_info);

    let init_result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    init_result.map_err(|err| Error::Logging(err.to_string()))
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let base_level = config.level.to_string().to_ascii_lowercase();

    let filter_string = if let Some(custom_filter) = &config.filter {
        custom_filter.clone()
    } else {
        // Default filter: workspace crates at the configured level,
        // dependencies at warn.
        format!(
            "core_runtime={level},core_i18n={level},core_player={level},\
             renderer_traits={level},renderer_hls={level},renderer_dash={level},\
             renderer_flv={level},renderer_vr={level},tokio=warn",
            level = base_level,
        )
    };

    filter_string
        .parse::<EnvFilter>()
        .map_err(|err| Error::Config(format!("invalid log filter `{filter_string}`: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_info_level() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(config.filter.is_none());
        assert!(config.display_target);
    }

    #[test]
    fn builder_methods_compose() {
        let config = LoggingConfig::default()
            .with_format(LogFormat::Compact)
            .with_level(Level::DEBUG)
            .with_filter("core_player=trace")
            .with_thread_info(true);

        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.level, Level::DEBUG);
        assert_eq!(config.filter.as_deref(), Some("core_player=trace"));
        assert!(config.display_thread_info);
    }

    #[test]
    fn default_filter_names_workspace_crates() {
        let config = LoggingConfig::default().with_level(Level::DEBUG);
        let filter = build_filter(&config).unwrap();
        let rendered = filter.to_string();
        assert!(rendered.contains("core_player=debug"));
        assert!(rendered.contains("renderer_hls=debug"));
    }

    #[test]
    fn invalid_custom_filter_is_rejected() {
        let config = LoggingConfig::default().with_filter("core_player=not_a_level");
        assert!(build_filter(&config).is_err());
    }
}
