use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

pub type GlowResult<T> = Result<T, GlowError>;

/// Failure kinds of a single model invocation. All of these are fatal to
/// the current call; nothing is retried.
#[derive(Debug, Error)]
pub enum GlowError {
    #[error("required tool '{name}' is not available: {reason}")]
    ToolUnavailable { name: String, reason: String },

    #[error("CMake {step} step failed with {status}")]
    BuildFailure { step: String, status: ExitStatus },

    #[error("simulation '{}' exceeded its {budget:?} time budget", executable.display())]
    ProcessTimeout {
        executable: PathBuf,
        budget: Duration,
    },

    #[error("simulation '{}' failed: {reason}", executable.display())]
    ProcessFailure {
        executable: PathBuf,
        reason: String,
    },

    #[error("malformed simulation output: {0}")]
    Format(String),

    #[error("geomagnetic index lookup failed: {0}")]
    Indices(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::GlowError;
    use std::time::Duration;

    #[test]
    fn timeout_error_names_the_executable_and_budget() {
        let error = GlowError::ProcessTimeout {
            executable: "build/glowbasic".into(),
            budget: Duration::from_secs(5),
        };
        assert_eq!(
            error.to_string(),
            "simulation 'build/glowbasic' exceeded its 5s time budget"
        );
    }

    #[test]
    fn format_error_carries_the_deviation_message() {
        let error = GlowError::Format("header row has 9 fields, expected 10".to_string());
        assert!(error.to_string().contains("expected 10"));
    }
}
