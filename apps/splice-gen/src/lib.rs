//! # splice-gen
//!
//! Regenerates `datastore_grpc_pb2.py`: the lines the gRPC plugin adds to
//! `datastore_pb2.py`, prefixed with imports of every message type from the
//! plain module.
//!
//! ## Module Organization
//! ```text
//! splice_gen/
//! ├── lib.rs        ◄─── You are here (logging setup & exports)
//! ├── config.rs     ◄─── Defaults → TOML → environment
//! ├── paths.rs      ◄─── Fixed proto / output locations
//! ├── protoc.rs     ◄─── Compiler invocation in scratch directories
//! ├── pipeline.rs   ◄─── generate → align → extract → render → write
//! ├── writer.rs     ◄─── Atomic file replacement
//! └── error.rs      ◄─── GenError and exit statuses
//! ```
//!
//! ## Environment
//! - `GRPCIO_VIRTUALENV` - virtualenv whose `bin/python` runs the compiler
//! - `SPLICE_PYTHON` - explicit interpreter path
//! - `SPLICE_PROJECT_ROOT` - checkout root (default: current directory)
//! - `SPLICE_STRICT_ALIGNMENT` - `false` to accept a best-effort diff
//! - `SPLICE_CONFIG` - optional TOML config file
//! - `RUST_LOG` - log filter (default: `info`)

pub mod config;
pub mod error;
pub mod paths;
pub mod pipeline;
pub mod protoc;
pub mod writer;

use tracing_subscriber::EnvFilter;

pub use config::{ConfigError, GenConfig};
pub use error::{GenError, GenResult};
pub use pipeline::{run, splice, SpliceReport};
pub use protoc::{CodeGenerator, Plugin, ProtocGenerator};

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr; the compiler's own output shares the terminal.
/// - Default: INFO level
/// - `RUST_LOG=splice_gen=debug` - show compiler command lines
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
