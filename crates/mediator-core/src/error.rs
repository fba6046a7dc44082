//! Error handling for the mediation core.
//!
//! Provides the root error type, exit code mapping, and the handful of
//! domain-specific error enums used by the policy store, fingerprinter, and
//! configuration loader.

use thiserror::Error;

/// Convenient result alias for mediator operations.
pub type Result<T> = std::result::Result<T, MediatorError>;

/// Root error type for all mediator operations.
///
/// Distinct from a [`crate::pipeline::BlockSignal`]: a `MediatorError` is an
/// unexpected failure (bad config, I/O, malformed policy file), while a
/// block signal is an intentional authorization decision.
#[derive(Error, Debug)]
pub enum MediatorError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("policy store error: {0}")]
    Policy(#[from] PolicyError),

    #[error("JSON processing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML processing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("glob pattern error: {0}")]
    Glob(#[from] globset::Error),

    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("operation timeout: {operation} took longer than {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },

    #[error("{message}: {source}")]
    Context {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Wraps arbitrary errors from external libraries.
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// Standard process exit codes.
///
/// A block signal is not an error at all: it is a policy decision surfaced
/// in the dispatch result. Exit codes here only cover the failure path: a
/// `MediatorError` that escaped the pipeline entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    Blocked = 2,
    ConfigError = 3,
    TimeoutError = 5,
    InternalError = 99,
}

impl From<&MediatorError> for ExitCode {
    fn from(error: &MediatorError) -> Self {
        match error {
            MediatorError::Config(_) => ExitCode::ConfigError,
            MediatorError::Timeout { .. } => ExitCode::TimeoutError,
            MediatorError::Anyhow(_) => ExitCode::InternalError,
            MediatorError::Context { source, .. } => {
                if let Some(inner) = source.downcast_ref::<MediatorError>() {
                    ExitCode::from(inner)
                } else {
                    ExitCode::GeneralError
                }
            }
            _ => ExitCode::GeneralError,
        }
    }
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("malformed config file {path}: {reason}")]
    Malformed { path: String, reason: String },
}

/// Errors raised by the intent policy store.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("intent file is malformed: {reason}")]
    MalformedIntents { reason: String },

    #[error("unknown intent: {id}")]
    UnknownIntent { id: String },
}

/// Extension trait to attach additional context while bubbling errors up.
pub trait ErrorContext<T> {
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| MediatorError::Context {
            message: f(),
            source: Box::new(e),
        })
    }
}
