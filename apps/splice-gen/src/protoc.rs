//! # Compiler Invocation
//!
//! Runs `python -m grpc.tools.protoc` into a scratch directory and reads
//! back the generated `_pb2.py` module.
//!
//! ## Scratch Directory Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TempDir::new()                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  python -m grpc.tools.protoc --proto_path <protos>                      │
//! │         --python_out <tmp> [--grpc_python_out <tmp>] <proto>            │
//! │       │                                                                 │
//! │       ├── status != 0 ──► GenError::ToolFailed ─┐                       │
//! │       │                                         │                       │
//! │       ▼                                         │                       │
//! │  read <tmp>/google/datastore/v1/datastore_pb2.py│                       │
//! │       │                                         │                       │
//! │       ▼                                         ▼                       │
//! │  TempDir dropped ──► directory removed on every path                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use splice_core::GeneratedSource;
use tempfile::TempDir;
use tracing::{debug, info};

use crate::config::GenConfig;
use crate::error::{GenError, GenResult};
use crate::paths::{generated_module_path, ProjectPaths, PROTO_FILE};

// =============================================================================
// Plugin Selection
// =============================================================================

/// Which generators the compiler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plugin {
    /// `--python_out` only.
    Plain,

    /// `--python_out` plus `--grpc_python_out` into the same directory.
    Grpc,
}

impl std::fmt::Display for Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Plugin::Plain => write!(f, "plain"),
            Plugin::Grpc => write!(f, "grpc"),
        }
    }
}

// =============================================================================
// Code Generator Seam
// =============================================================================

/// Produces one generated module per call.
pub trait CodeGenerator {
    fn generate(&self, plugin: Plugin) -> GenResult<GeneratedSource>;
}

// =============================================================================
// Invocation
// =============================================================================

/// One `python -m <module>` command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocInvocation {
    pub python: PathBuf,
    pub module: String,
    pub protos_dir: PathBuf,
    pub proto_file: PathBuf,
    pub out_dir: PathBuf,
    pub plugin: Plugin,
}

impl ProtocInvocation {
    /// Arguments passed after the interpreter.
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-m".into(),
            self.module.clone().into(),
            "--proto_path".into(),
            self.protos_dir.clone().into(),
            "--python_out".into(),
            self.out_dir.clone().into(),
        ];
        if self.plugin == Plugin::Grpc {
            args.push("--grpc_python_out".into());
            args.push(self.out_dir.clone().into());
        }
        args.push(self.proto_file.clone().into());
        args
    }

    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.python);
        command.args(self.args());
        command
    }

    /// Runs the compiler to completion, inheriting stdio.
    pub fn run(&self) -> GenResult<()> {
        let program = self.python.display().to_string();
        debug!(program = %program, args = ?self.args(), "Invoking compiler");

        let status = self
            .command()
            .status()
            .map_err(|source| GenError::Spawn {
                program: program.clone(),
                source,
            })?;

        check_status(program, status)
    }
}

fn check_status(program: String, status: ExitStatus) -> GenResult<()> {
    match status.code() {
        Some(0) => Ok(()),
        Some(status) => Err(GenError::ToolFailed { program, status }),
        None => Err(GenError::ToolTerminated { program }),
    }
}

// =============================================================================
// Process-Backed Generator
// =============================================================================

/// Runs the real compiler, one fresh scratch directory per call.
#[derive(Debug, Clone)]
pub struct ProtocGenerator {
    python: PathBuf,
    module: String,
    paths: ProjectPaths,
    scratch_parent: Option<PathBuf>,
}

impl ProtocGenerator {
    pub fn new(config: &GenConfig) -> Self {
        ProtocGenerator {
            python: config.python.clone(),
            module: config.protoc_module.clone(),
            paths: config.paths(),
            scratch_parent: None,
        }
    }

    /// Creates scratch directories under `dir` instead of the system temp dir.
    pub fn scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_parent = Some(dir.into());
        self
    }

    fn scratch(&self) -> io::Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("splice-protoc-");
        match &self.scratch_parent {
            Some(parent) => builder.tempdir_in(parent),
            None => builder.tempdir(),
        }
    }

    fn invocation(&self, out_dir: &Path, plugin: Plugin) -> ProtocInvocation {
        ProtocInvocation {
            python: self.python.clone(),
            module: self.module.clone(),
            protos_dir: self.paths.protos_dir.clone(),
            proto_file: self.paths.proto_file.clone(),
            out_dir: out_dir.to_path_buf(),
            plugin,
        }
    }
}

impl CodeGenerator for ProtocGenerator {
    fn generate(&self, plugin: Plugin) -> GenResult<GeneratedSource> {
        let scratch = self
            .scratch()
            .map_err(|e| GenError::io("Failed to create scratch directory", e))?;

        self.invocation(scratch.path(), plugin).run()?;

        let generated = scratch.path().join(generated_module_path(PROTO_FILE));
        let text = match std::fs::read_to_string(&generated) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(GenError::MissingOutput { path: generated });
            }
            Err(e) => {
                return Err(GenError::io(
                    format!("Failed to read {}", generated.display()),
                    e,
                ));
            }
        };

        let source = GeneratedSource::new(text);
        info!(%plugin, lines = source.line_count(), "Generated module");
        Ok(source)
    }
}
