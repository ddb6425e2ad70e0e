//! Error types for dispatch.
//!
//! Command failures are not errors here: they are [`CommandResult`]s with
//! `succeeded == false`. [`DispatchError`] only covers the plumbing around a
//! command, that is writing its result to an output or error destination.
//!
//! [`CommandResult`]: crate::CommandResult

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which of the two destinations a write was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// Where successful output goes
    Output,
    /// Where failures and usage go
    Error,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::Output => write!(f, "output"),
            SinkKind::Error => write!(f, "error"),
        }
    }
}

/// Errors that can occur while delivering a result.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Writing to a sink failed.
    #[error("failed to write to {sink} sink: {source}")]
    Write {
        sink: SinkKind,
        #[source]
        source: io::Error,
    },

    /// A file destination could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DispatchError {
    pub(crate) fn write(sink: SinkKind) -> impl FnOnce(io::Error) -> Self {
        move |source| DispatchError::Write { sink, source }
    }
}

/// Result type for dispatch operations that touch a sink.
pub type Result<T> = std::result::Result<T, DispatchError>;
