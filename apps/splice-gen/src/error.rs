//! Error types for the splice generator.
//!
//! ## Exit Codes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GenError::ToolFailed { status: N }   → exit N (compiler's own status)  │
//! │  anything else                        → exit 1                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::PathBuf;

use splice_core::CoreError;

use crate::config::ConfigError;

/// Result type alias for generator operations.
pub type GenResult<T> = Result<T, GenError>;

/// Splice generator errors.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// The compiler ran and exited with a non-zero status.
    #[error("{program} exited with status {status}")]
    ToolFailed { program: String, status: i32 },

    /// The compiler was killed before it could exit.
    #[error("{program} was terminated by a signal")]
    ToolTerminated { program: String },

    /// The compiler could not be started at all.
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The proto definition is not where it is expected.
    #[error("Proto file not found: {}", path.display())]
    MissingProto { path: PathBuf },

    /// The compiler succeeded but did not write the expected module.
    #[error("Compiler did not produce {}", path.display())]
    MissingOutput { path: PathBuf },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl GenError {
    /// Wraps an I/O error with a description of what was being attempted.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        GenError::Io {
            context: context.into(),
            source,
        }
    }

    /// The process exit status this error should produce.
    ///
    /// A failed compiler run is passed through unchanged so callers see the
    /// compiler's own status. Statuses that do not fit in a `u8` become 1.
    pub fn exit_status(&self) -> u8 {
        match self {
            GenError::ToolFailed { status, .. } => u8::try_from(*status)
                .ok()
                .filter(|code| *code != 0)
                .unwrap_or(1),
            _ => 1,
        }
    }
}

impl From<splice_core::AlignError> for GenError {
    fn from(err: splice_core::AlignError) -> Self {
        GenError::Core(err.into())
    }
}

impl From<splice_core::ExtractError> for GenError {
    fn from(err: splice_core::ExtractError) -> Self {
        GenError::Core(err.into())
    }
}
