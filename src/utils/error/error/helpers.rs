//! Helper functions for creating specific error types

use super::types::SyncError;

impl SyncError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn source<S: Into<String>>(message: S) -> Self {
        Self::Source(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether the error came from configuration rather than from the input
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Process exit code for this error
    ///
    /// Configuration problems exit with 2, everything else with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            _ => 1,
        }
    }
}
