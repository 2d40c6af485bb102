//! # Splice Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  generate(+grpc) ──► generate(plain) ──► align ──► extract ──► render  │
//! │        │                   │                                    │       │
//! │   any failure here aborts before the output is touched          ▼       │
//! │                                                          write_atomic   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The plain module is generated once and feeds both the alignment and the
//! message-type extraction.

use std::path::PathBuf;

use splice_core::{align_lines, extract_message_types, AlignMode, SpliceDocument};
use tracing::{info, warn};

use crate::config::GenConfig;
use crate::error::{GenError, GenResult};
use crate::paths::IMPORT_MODULE;
use crate::protoc::{CodeGenerator, Plugin, ProtocGenerator};
use crate::writer::write_atomic;

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceReport {
    pub output: PathBuf,
    pub grpc_only_lines: usize,
    pub message_types: usize,
}

/// The rendered output plus the counts that went into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spliced {
    pub contents: String,
    pub grpc_only_lines: usize,
    pub message_types: usize,
}

/// Generates both modules and renders the spliced output. Writes nothing.
pub fn splice<G: CodeGenerator>(
    generator: &G,
    import_module: &str,
    mode: AlignMode,
) -> GenResult<Spliced> {
    let with_grpc = generator.generate(Plugin::Grpc)?;
    let plain = generator.generate(Plugin::Plain)?;

    let grpc_lines = with_grpc.lines();
    let plain_lines = plain.lines();

    let alignment = align_lines(&grpc_lines, &plain_lines, mode)?;
    if !alignment.is_complete() {
        warn!(
            unmatched = alignment.unmatched(),
            "Plain output is not a subsequence of the gRPC output; result is best-effort"
        );
    }

    let message_types = extract_message_types(&plain_lines)?;
    for name in message_types.duplicates() {
        warn!(name = %name, "Message type declared more than once; importing it once");
    }

    info!(
        grpc_only = alignment.grpc_only.len(),
        message_types = message_types.len(),
        "Computed gRPC-only lines"
    );

    let contents = SpliceDocument::new(import_module, &message_types, &alignment.grpc_only).render();

    Ok(Spliced {
        contents,
        grpc_only_lines: alignment.grpc_only.len(),
        message_types: message_types.len(),
    })
}

/// Runs the whole pipeline against the real compiler.
pub fn run(config: &GenConfig) -> GenResult<SpliceReport> {
    let paths = config.paths();
    if !paths.proto_file.is_file() {
        return Err(GenError::MissingProto {
            path: paths.proto_file,
        });
    }

    info!(
        proto = %paths.proto_file.display(),
        python = %config.python.display(),
        mode = %AlignMode::from_strict(config.strict_alignment),
        "Splicing gRPC-only lines"
    );

    let generator = ProtocGenerator::new(config);
    let spliced = splice(
        &generator,
        IMPORT_MODULE,
        AlignMode::from_strict(config.strict_alignment),
    )?;

    write_atomic(&paths.output_file, &spliced.contents)?;
    info!(output = %paths.output_file.display(), "Wrote gRPC-only module");

    Ok(SpliceReport {
        output: paths.output_file,
        grpc_only_lines: spliced.grpc_only_lines,
        message_types: spliced.message_types,
    })
}
