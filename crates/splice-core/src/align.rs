//! # Line Alignment
//!
//! Finds the lines the gRPC plugin inserted into a generated module.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Forward-Pointer Alignment                            │
//! │                                                                         │
//! │  with grpc (A)        plain (B)          cursor   result                │
//! │  ─────────────        ─────────          ──────   ──────                │
//! │  "x\n"          ==    B[0] "x\n"          0 → 1                          │
//! │  "y\n"          !=    B[1] "z\n"          1        grpc_only += "y\n"    │
//! │  "z\n"          ==    B[1] "z\n"          1 → 2                          │
//! │                                                                         │
//! │  grpc_only = ["y\n"]                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This is positional equality, not a general sequence diff. It is only
//! correct when B appears in A in the same relative order with nothing but
//! insertions between its lines. [`AlignMode`] decides what happens when
//! that does not hold.

use crate::error::AlignError;

// =============================================================================
// Align Mode
// =============================================================================

/// How to treat a plain output that is not a subsequence of the gRPC output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignMode {
    /// Fail when lines of the plain output are left unmatched.
    #[default]
    Strict,

    /// Return the best-effort result; unmatched plain lines are ignored.
    Lenient,
}

impl AlignMode {
    /// Maps a `strict` flag to a mode.
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            AlignMode::Strict
        } else {
            AlignMode::Lenient
        }
    }
}

impl std::fmt::Display for AlignMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlignMode::Strict => write!(f, "strict"),
            AlignMode::Lenient => write!(f, "lenient"),
        }
    }
}

// =============================================================================
// Alignment
// =============================================================================

/// Result of aligning the plain output against the gRPC output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment<'a> {
    /// Lines present only in the gRPC output, in order.
    pub grpc_only: Vec<&'a str>,

    /// How many plain lines were matched.
    pub consumed: usize,

    /// Total number of plain lines.
    pub plain_len: usize,
}

impl Alignment<'_> {
    /// True when every plain line was matched.
    pub fn is_complete(&self) -> bool {
        self.consumed == self.plain_len
    }

    /// Number of plain lines left unmatched.
    pub fn unmatched(&self) -> usize {
        self.plain_len - self.consumed
    }
}

/// Walks `with_grpc` once, matching it against `plain` with a single cursor.
///
/// Every line of `with_grpc` that does not equal the plain line under the
/// cursor is recorded as gRPC-only. Once `plain` is exhausted, all remaining
/// lines are gRPC-only.
///
/// ## Errors
/// In [`AlignMode::Strict`], returns [`AlignError::NotASubsequence`] if any
/// plain line is left unmatched.
pub fn align_lines<'a, A, B>(
    with_grpc: &'a [A],
    plain: &[B],
    mode: AlignMode,
) -> Result<Alignment<'a>, AlignError>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let mut cursor = 0;
    let mut grpc_only = Vec::with_capacity(with_grpc.len().saturating_sub(plain.len()));

    for line in with_grpc {
        let line = line.as_ref();
        match plain.get(cursor) {
            Some(expected) if expected.as_ref() == line => cursor += 1,
            _ => grpc_only.push(line),
        }
    }

    if mode == AlignMode::Strict && cursor < plain.len() {
        return Err(AlignError::NotASubsequence {
            consumed: cursor,
            expected: plain.len(),
            first_unmatched: plain[cursor].as_ref().to_string(),
        });
    }

    Ok(Alignment {
        grpc_only,
        consumed: cursor,
        plain_len: plain.len(),
    })
}
