//! Structured logging initialization, driven by [`crate::config::LoggingConfig`].

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::error::{ConfigError, MediatorError, Result};

/// Initialize the global tracing subscriber. Safe to call once per process;
/// a second call returns an error rather than panicking.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.level).map_err(|e| {
        MediatorError::Config(ConfigError::InvalidValue {
            field: "logging.level".to_string(),
            value: config.level.clone(),
            reason: format!("invalid tracing filter: {e}"),
        })
    })?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let layer = match (config.format.as_str(), config.output.as_str()) {
        ("json", "stdout") => fmt::layer().json().with_writer(std::io::stdout).boxed(),
        ("json", _) => fmt::layer().json().with_writer(std::io::stderr).boxed(),
        ("pretty", "stdout") => fmt::layer().pretty().with_writer(std::io::stdout).boxed(),
        ("pretty", _) => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
        (_, "stdout") => fmt::layer().with_writer(std::io::stdout).boxed(),
        _ => fmt::layer().with_writer(std::io::stderr).boxed(),
    };

    registry.with(layer).try_init().map_err(|e| {
        MediatorError::Config(ConfigError::InvalidValue {
            field: "logging".to_string(),
            value: "subscriber".to_string(),
            reason: format!("failed to initialize tracing subscriber: {e}"),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_env_filter_for_every_valid_level() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(EnvFilter::try_new(level).is_ok());
        }
    }

    #[test]
    fn rejects_malformed_filter_directive() {
        let mut config = LoggingConfig::default();
        config.level = "not a filter!!".to_string();
        assert!(init_logging(&config).is_err());
    }
}
