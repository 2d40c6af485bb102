//! # Error Types
//!
//! Error types for splice-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  splice-core errors (this file)                                         │
//! │  ├── CoreError      - Umbrella for the pure pipeline stages             │
//! │  ├── AlignError     - Plain output is not a subsequence                 │
//! │  └── ExtractError   - Malformed message-type declaration                │
//! │                                                                         │
//! │  splice-gen errors (separate crate)                                     │
//! │  └── GenError       - Compiler, filesystem and config failures          │
//! │                                                                         │
//! │  Flow: AlignError/ExtractError → CoreError → GenError → exit code       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by the pure pipeline stages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Alignment failed (wraps AlignError).
    #[error("Alignment failed: {0}")]
    Align(#[from] AlignError),

    /// Extraction failed (wraps ExtractError).
    #[error("Message-type extraction failed: {0}")]
    Extract(#[from] ExtractError),
}

// =============================================================================
// Align Error
// =============================================================================

/// Alignment errors.
#[derive(Debug, Error)]
pub enum AlignError {
    /// The plain output is not an in-order subsequence of the gRPC output.
    ///
    /// ## When This Occurs
    /// - The compiler reordered or rewrote lines when the plugin was enabled
    /// - The two runs used different compiler versions
    ///
    /// Only raised in [`AlignMode::Strict`](crate::AlignMode::Strict).
    #[error(
        "plain output is not a subsequence of the gRPC output: matched {consumed} of {expected} lines, first unmatched line {first_unmatched:?}"
    )]
    NotASubsequence {
        consumed: usize,
        expected: usize,
        first_unmatched: String,
    },
}

// =============================================================================
// Extract Error
// =============================================================================

/// Message-type extraction errors.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The marker appears more than once on a single line.
    #[error("line {line_number} contains the message marker more than once: {line:?}")]
    MalformedMarkerLine { line_number: usize, line: String },

    /// Nothing precedes the marker on the line.
    #[error("line {line_number} declares a message type with an empty name")]
    EmptyName { line_number: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
