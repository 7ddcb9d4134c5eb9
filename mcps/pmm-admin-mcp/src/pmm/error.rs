//! Error types for pmm-admin operations
//!
//! [`ProcessError`] describes what went wrong with a single pmm-admin
//! invocation. [`PmmError`] says which stage of a reconciliation failed.

use thiserror::Error;

/// Failures of a single external process invocation
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The binary is not installed or not in PATH
    #[error("{program} not found - ensure pmm-admin is installed and in PATH")]
    NotFound {
        /// Program that was looked up
        program: String,
    },

    /// The process could not be spawned or its output could not be collected
    #[error("failed to run {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process did not finish in time and was killed
    #[error("{program} timed out after {secs}s")]
    Timeout { program: String, secs: u64 },

    /// The process exited with a non-zero status code
    #[error("{program} exited with code {code}: {stderr}")]
    NonZeroExit {
        program: String,
        /// Exit code, -1 when terminated by a signal
        code: i32,
        /// Standard error output
        stderr: String,
    },
}

/// Errors surfaced by a reconciliation
#[derive(Error, Debug)]
pub enum PmmError {
    /// Required field missing or a value outside its allowed set
    #[error("invalid service parameters: {0}")]
    Validation(String),

    /// The listing command could not run or exited non-zero
    #[error("listing registered services failed: {0}")]
    ListingFailed(#[source] ProcessError),

    /// The converging command could not be run to completion
    #[error("pmm-admin command could not be executed: {0}")]
    ExecutionFailed(#[source] ProcessError),

    /// A configuration file could not be read or parsed
    #[error("config error: {0}")]
    Config(String),
}

impl PmmError {
    pub fn validation(message: impl Into<String>) -> Self {
        PmmError::Validation(message.into())
    }

    /// True when the caller's input was rejected before anything ran
    pub fn is_validation(&self) -> bool {
        matches!(self, PmmError::Validation(_))
    }
}

/// Result type alias for pmm-admin operations
pub type PmmResult<T> = Result<T, PmmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_failure_message_includes_exit_code() {
        let err = PmmError::ListingFailed(ProcessError::NonZeroExit {
            program: "pmm-admin".to_string(),
            code: 1,
            stderr: "Failed to get PMM Agent status".to_string(),
        });
        let msg = err.to_string();
        assert!(msg.contains("listing registered services failed"));
        assert!(msg.contains("exited with code 1"));
        assert!(msg.contains("Failed to get PMM Agent status"));
    }

    #[test]
    fn test_is_validation() {
        assert!(PmmError::validation("service_name is required").is_validation());
        let timeout = PmmError::ExecutionFailed(ProcessError::Timeout {
            program: "pmm-admin".to_string(),
            secs: 30,
        });
        assert!(!timeout.is_validation());
        assert_eq!(
            timeout.to_string(),
            "pmm-admin command could not be executed: pmm-admin timed out after 30s"
        );
    }
}
