//! Layered configuration for the mediation core.
//!
//! Resolution order: built-in defaults, then `<workspace>/.orchestration/mediator.json`
//! if present, then `MEDIATOR_*` environment overrides. Re-resolved once per
//! façade construction. Unlike the policy store, config is not re-read per call.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

fn default_intent_file() -> PathBuf {
    PathBuf::from(".orchestration/active_intents.yaml")
}

fn default_ignore_file() -> PathBuf {
    PathBuf::from(".intentignore")
}

fn default_trace_file() -> PathBuf {
    PathBuf::from(".orchestration/agent_trace.jsonl")
}

fn default_intent_map_file() -> PathBuf {
    PathBuf::from(".orchestration/INTENT_MAP.md")
}

fn default_lessons_file() -> PathBuf {
    PathBuf::from("CLAUDE.md")
}

fn default_vcs_timeout_ms() -> u64 {
    3_000
}

fn default_pipeline_time_ms() -> u64 {
    30_000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "plain".to_string()
}

fn default_log_output() -> String {
    "stderr".to_string()
}

/// Workspace-relative paths for the policy file, ignore file, and ledgers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyPaths {
    pub intent_file: PathBuf,
    pub ignore_file: PathBuf,
    pub trace_file: PathBuf,
    pub intent_map_file: PathBuf,
    pub lessons_file: PathBuf,
}

impl Default for PolicyPaths {
    fn default() -> Self {
        Self {
            intent_file: default_intent_file(),
            ignore_file: default_ignore_file(),
            trace_file: default_trace_file(),
            intent_map_file: default_intent_map_file(),
            lessons_file: default_lessons_file(),
        }
    }
}

/// Version-control probe configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VcsConfig {
    pub probe_timeout_ms: u64,
}

impl Default for VcsConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: default_vcs_timeout_ms(),
        }
    }
}

/// System-wide timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub max_pipeline_time_ms: u64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            max_pipeline_time_ms: default_pipeline_time_ms(),
        }
    }
}

/// Logging configuration consumed by [`crate::logging::init_logging`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            output: default_log_output(),
        }
    }
}

/// Root mediator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediatorConfig {
    pub policy: PolicyPaths,
    pub vcs: VcsConfig,
    pub system: SystemConfig,
    pub logging: LoggingConfig,
}

impl Default for MediatorConfig {
    fn default() -> Self {
        Self {
            policy: PolicyPaths::default(),
            vcs: VcsConfig::default(),
            system: SystemConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl MediatorConfig {
    /// Load configuration for a workspace: defaults, then an optional
    /// `<workspace>/.orchestration/mediator.json`, then environment overrides.
    pub fn load(workspace: &Path) -> Result<Self> {
        let mut config = Self::default();

        let override_path = workspace.join(".orchestration/mediator.json");
        if override_path.is_file() {
            let raw = std::fs::read_to_string(&override_path)?;
            config = serde_json::from_str(&raw).map_err(|e| {
                ConfigError::Malformed {
                    path: override_path.display().to_string(),
                    reason: e.to_string(),
                }
            })?;
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("MEDIATOR_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("MEDIATOR_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Ok(timeout) = std::env::var("MEDIATOR_VCS_TIMEOUT_MS")
            && let Ok(ms) = timeout.parse::<u64>()
        {
            self.vcs.probe_timeout_ms = ms;
        }
    }

    /// Validate invariants that defaults and file overrides must both satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.system.max_pipeline_time_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "system.max_pipeline_time_ms".into(),
                value: "0".into(),
                reason: "must be greater than 0".into(),
            }
            .into());
        }

        if self.vcs.probe_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "vcs.probe_timeout_ms".into(),
                value: "0".into(),
                reason: "must be greater than 0".into(),
            }
            .into());
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".into(),
                value: self.logging.level.clone(),
                reason: format!("must be one of {valid_levels:?}"),
            }
            .into());
        }

        let valid_formats = ["json", "pretty", "plain"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.format".into(),
                value: self.logging.format.clone(),
                reason: format!("must be one of {valid_formats:?}"),
            }
            .into());
        }

        let valid_outputs = ["stdout", "stderr"];
        if !valid_outputs.contains(&self.logging.output.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.output".into(),
                value: self.logging.output.clone(),
                reason: format!("must be one of {valid_outputs:?}"),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(MediatorConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = MediatorConfig::default();
        config.system.max_pipeline_time_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut config = MediatorConfig::default();
        config.logging.level = "verbose".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn loads_defaults_when_no_override_file_present() {
        let dir = tempfile::tempdir().unwrap();
        let config = MediatorConfig::load(dir.path()).unwrap();
        assert_eq!(config, MediatorConfig::default());
    }

    #[test]
    fn file_override_replaces_section() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".orchestration")).unwrap();
        std::fs::write(
            dir.path().join(".orchestration/mediator.json"),
            r#"{"logging": {"level": "debug", "format": "json", "output": "stdout"}}"#,
        )
        .unwrap();

        let config = MediatorConfig::load(dir.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn env_override_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".orchestration")).unwrap();
        std::fs::write(
            dir.path().join(".orchestration/mediator.json"),
            r#"{"logging": {"level": "debug", "format": "plain", "output": "stderr"}}"#,
        )
        .unwrap();

        // SAFETY: test-only, single-threaded env mutation scoped to this test.
        unsafe { std::env::set_var("MEDIATOR_LOG_LEVEL", "error") };
        let config = MediatorConfig::load(dir.path()).unwrap();
        unsafe { std::env::remove_var("MEDIATOR_LOG_LEVEL") };

        assert_eq!(config.logging.level, "error");
    }
}
