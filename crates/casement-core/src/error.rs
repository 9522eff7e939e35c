//! Error types for Casement core services.

use std::fmt;

/// The main error type for core operations.
#[derive(Debug)]
pub enum CoreError {
    /// Scheduler-related error.
    Scheduler(SchedulerError),
    /// The receiving side of the event queue has been dropped.
    QueueDisconnected,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduler(err) => write!(f, "Scheduler error: {err}"),
            Self::QueueDisconnected => {
                write!(f, "The event queue consumer has been dropped")
            }
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scheduler(err) => Some(err),
            Self::QueueDisconnected => None,
        }
    }
}

impl From<SchedulerError> for CoreError {
    fn from(err: SchedulerError) -> Self {
        Self::Scheduler(err)
    }
}

/// Scheduler-specific errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    /// The task ID is invalid or the task has already been cancelled.
    InvalidTaskId,
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTaskId => {
                write!(f, "Invalid or already-cancelled scheduled task ID")
            }
        }
    }
}

impl std::error::Error for SchedulerError {}

/// Result type for core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
