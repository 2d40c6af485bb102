//! # splice-core: Pure Text Processing for the Splice Generator
//!
//! Everything that happens between "the compiler wrote two files" and
//! "the output file is written" lives here, as pure functions over text.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Splice Data Flow                                 │
//! │                                                                         │
//! │  protoc (plain)           protoc (+grpc)                                │
//! │       │                        │                                        │
//! │       ▼                        ▼                                        │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ splice-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  source   │  │   align   │  │ messages  │  │  render   │  │   │
//! │  │   │  lines    │─►│ grpc-only │  │ type names│─►│ imports + │  │   │
//! │  │   │           │  │   lines   │─►│           │  │ grpc lines│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PROCESSES • PURE FUNCTIONS                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │                                ▼                                        │
//! │                   splice-gen writes the file                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`source`] - Generated module text split into lines
//! - [`align`] - Forward-pointer alignment diff
//! - [`messages`] - Message-type name extraction
//! - [`render`] - The spliced output document
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use splice_core::{align_lines, AlignMode};
//!
//! let with_grpc = ["x\n", "y\n", "z\n"];
//! let plain = ["x\n", "z\n"];
//!
//! let alignment = align_lines(&with_grpc, &plain, AlignMode::Strict).unwrap();
//! assert_eq!(alignment.grpc_only, vec!["y\n"]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod align;
pub mod error;
pub mod messages;
pub mod render;
pub mod source;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use align::{align_lines, AlignMode, Alignment};
pub use error::{AlignError, CoreError, CoreResult, ExtractError};
pub use messages::{extract_message_types, MessageTypes};
pub use render::SpliceDocument;
pub use source::GeneratedSource;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Substring that marks a generated message-type class declaration in a
/// Python `_pb2` module. The text left of it is the class name.
pub const MESSAGE_MARKER: &str = " = _reflection.GeneratedProtocolMessageType(";

/// First line of every spliced output file.
pub const IMPORTS_HEADER: &str = "# BEGIN: Imports from datastore_pb2\n";

/// Line separating the import block from the gRPC-only lines.
pub const IMPORTS_FOOTER: &str = "#   END: Imports from datastore_pb2\n";
