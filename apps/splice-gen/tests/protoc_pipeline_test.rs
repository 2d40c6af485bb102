//! End-to-end tests against a fake `python -m grpc.tools.protoc`.
//!
//! The fake interpreter is a shell script that copies canned modules into
//! the `--python_out` directory and logs each scratch directory it was given.
//! Tests run serially so no other thread forks while a script is being written.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use serial_test::serial;
use splice_core::{AlignMode, IMPORTS_FOOTER, IMPORTS_HEADER, MESSAGE_MARKER};
use splice_gen::paths::{OUTPUT_FILE, PROTOS_DIR, PROTO_FILE};
use splice_gen::{run, splice, GenConfig, GenError, ProtocGenerator};
use tempfile::TempDir;

const MODULE: &str = "google.cloud.datastore._generated.datastore_pb2";

struct Fixture {
    root: TempDir,
    script: PathBuf,
    log: PathBuf,
}

impl Fixture {
    fn new(plain_status: i32, grpc_status: i32, plain: &str, grpc: &str) -> Self {
        let root = tempfile::tempdir().unwrap();
        let fake = root.path().join("fake");
        fs::create_dir_all(&fake).unwrap();

        let proto = root.path().join(PROTOS_DIR).join(PROTO_FILE);
        fs::create_dir_all(proto.parent().unwrap()).unwrap();
        fs::write(&proto, "syntax = \"proto3\";\npackage google.datastore.v1;\n").unwrap();

        let output = root.path().join(OUTPUT_FILE);
        fs::create_dir_all(output.parent().unwrap()).unwrap();

        let plain_src = fake.join("plain_pb2.py");
        let grpc_src = fake.join("grpc_pb2.py");
        fs::write(&plain_src, plain).unwrap();
        fs::write(&grpc_src, grpc).unwrap();

        let log = fake.join("scratch.log");
        let script = fake.join("python");
        fs::write(
            &script,
            format!(
                r#"#!/bin/sh
out=""
grpc=0
while [ $# -gt 0 ]; do
  case "$1" in
    -m|--proto_path) shift ;;
    --python_out) out="$2"; shift ;;
    --grpc_python_out) grpc=1; shift ;;
  esac
  shift
done
echo "$out" >> "{log}"
if [ "$grpc" = 1 ]; then status={grpc_status}; src="{grpc_src}"; else status={plain_status}; src="{plain_src}"; fi
if [ "$status" != 0 ]; then echo "fake protoc failed" >&2; exit "$status"; fi
mkdir -p "$out/google/datastore/v1"
cp "$src" "$out/google/datastore/v1/datastore_pb2.py"
"#,
                log = log.display(),
                grpc_status = grpc_status,
                plain_status = plain_status,
                grpc_src = grpc_src.display(),
                plain_src = plain_src.display(),
            ),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        Fixture { root, script, log }
    }

    fn config(&self) -> GenConfig {
        GenConfig {
            project_root: self.root.path().to_path_buf(),
            python: self.script.clone(),
            protoc_module: "grpc.tools.protoc".to_string(),
            strict_alignment: true,
        }
    }

    fn output(&self) -> PathBuf {
        self.root.path().join(OUTPUT_FILE)
    }

    fn scratch_dirs(&self) -> Vec<PathBuf> {
        match fs::read_to_string(&self.log) {
            Ok(log) => log.lines().map(PathBuf::from).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn binary(&self) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_make-datastore-grpc"));
        command
            .env("SPLICE_PROJECT_ROOT", self.root.path())
            .env("SPLICE_PYTHON", &self.script)
            .env_remove("GRPCIO_VIRTUALENV")
            .env_remove("SPLICE_CONFIG")
            .env_remove("SPLICE_STRICT_ALIGNMENT");
        command
    }
}

fn plain_module() -> String {
    format!(
        "# Generated by the protocol buffer compiler.  DO NOT EDIT!\n\
         import sys\n\
         PartitionId{m}'PartitionId', (_message.Message,), dict(\n\
         Entity{m}'Entity', (_message.Message,), dict(\n\
         Key{m}'Key', (_message.Message,), dict(\n\
         # @@protoc_insertion_point(module_scope)\n",
        m = MESSAGE_MARKER
    )
}

fn grpc_module() -> String {
    format!(
        "# Generated by the protocol buffer compiler.  DO NOT EDIT!\n\
         import sys\n\
         PartitionId{m}'PartitionId', (_message.Message,), dict(\n\
         Entity{m}'Entity', (_message.Message,), dict(\n\
         Key{m}'Key', (_message.Message,), dict(\n\
         import grpc\n\
         class DatastoreStub(object):\n\
         \x20 pass\n\
         # @@protoc_insertion_point(module_scope)\n",
        m = MESSAGE_MARKER
    )
}

fn assert_removed(dirs: &[PathBuf]) {
    for dir in dirs {
        assert!(!dir.as_os_str().is_empty(), "compiler got no output dir");
        assert!(!dir.exists(), "scratch dir survived: {}", dir.display());
    }
}

#[test]
#[serial]
fn test_writes_imports_and_grpc_lines() {
    let fixture = Fixture::new(0, 0, &plain_module(), &grpc_module());

    let report = run(&fixture.config()).unwrap();
    assert_eq!(report.output, fixture.output());
    assert_eq!(report.grpc_only_lines, 3);
    assert_eq!(report.message_types, 3);

    let expected = format!(
        "{}from {m} import Entity\nfrom {m} import Key\nfrom {m} import PartitionId\n{}import grpc\nclass DatastoreStub(object):\n  pass\n",
        IMPORTS_HEADER,
        IMPORTS_FOOTER,
        m = MODULE
    );
    assert_eq!(fs::read_to_string(fixture.output()).unwrap(), expected);

    let dirs = fixture.scratch_dirs();
    assert_eq!(dirs.len(), 2);
    assert_ne!(dirs[0], dirs[1]);
    assert_removed(&dirs);
}

#[test]
#[serial]
fn test_generator_empties_its_scratch_parent() {
    let fixture = Fixture::new(0, 0, &plain_module(), &grpc_module());
    let scratch = fixture.root.path().join("scratch");
    fs::create_dir(&scratch).unwrap();

    let generator = ProtocGenerator::new(&fixture.config()).scratch_dir(&scratch);
    let spliced = splice(&generator, MODULE, AlignMode::Strict).unwrap();
    assert_eq!(spliced.grpc_only_lines, 3);

    for dir in fixture.scratch_dirs() {
        assert!(dir.starts_with(&scratch));
    }
    assert_eq!(fs::read_dir(&scratch).unwrap().count(), 0);
    assert!(!fixture.output().exists());
}

#[test]
#[serial]
fn test_grpc_failure_leaves_output_untouched() {
    let fixture = Fixture::new(0, 3, &plain_module(), &grpc_module());
    fs::write(fixture.output(), "# hand edits\n").unwrap();

    let err = run(&fixture.config()).unwrap_err();
    assert!(matches!(err, GenError::ToolFailed { status: 3, .. }));
    assert_eq!(err.exit_status(), 3);

    assert_eq!(fs::read_to_string(fixture.output()).unwrap(), "# hand edits\n");
    let dirs = fixture.scratch_dirs();
    assert_eq!(dirs.len(), 1);
    assert_removed(&dirs);
}

#[test]
#[serial]
fn test_plain_failure_creates_no_output() {
    let fixture = Fixture::new(4, 0, &plain_module(), &grpc_module());

    let err = run(&fixture.config()).unwrap_err();
    assert_eq!(err.exit_status(), 4);
    assert!(!fixture.output().exists());
    assert_removed(&fixture.scratch_dirs());
}

#[test]
#[serial]
fn test_strict_alignment_rejects_rewritten_output() {
    let rewritten = grpc_module().replace("import sys\n", "import os\n");
    let fixture = Fixture::new(0, 0, &plain_module(), &rewritten);

    let err = run(&fixture.config()).unwrap_err();
    assert!(matches!(err, GenError::Core(_)));
    assert_eq!(err.exit_status(), 1);
    assert!(!fixture.output().exists());

    let mut lenient = fixture.config();
    lenient.strict_alignment = false;
    let report = run(&lenient).unwrap();
    assert!(fixture.output().exists());
    assert_eq!(report.message_types, 3);
}

#[test]
#[serial]
fn test_missing_proto_never_runs_compiler() {
    let fixture = Fixture::new(0, 0, &plain_module(), &grpc_module());
    fs::remove_file(fixture.root.path().join(PROTOS_DIR).join(PROTO_FILE)).unwrap();

    let err = run(&fixture.config()).unwrap_err();
    assert!(matches!(err, GenError::MissingProto { .. }));
    assert!(fixture.scratch_dirs().is_empty());
}

#[test]
#[serial]
fn test_binary_exits_with_compiler_status() {
    let fixture = Fixture::new(0, 7, &plain_module(), &grpc_module());

    let status = fixture.binary().status().unwrap();
    assert_eq!(status.code(), Some(7));
    assert!(!fixture.output().exists());
}

#[test]
#[serial]
fn test_binary_success() {
    let fixture = Fixture::new(0, 0, &plain_module(), &grpc_module());

    let output = fixture.binary().output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let written = fs::read_to_string(fixture.output()).unwrap();
    assert!(written.starts_with(IMPORTS_HEADER));
    assert!(written.ends_with("  pass\n"));
}

#[test]
#[serial]
fn test_binary_rejects_bad_project_root() {
    let fixture = Fixture::new(0, 0, &plain_module(), &grpc_module());
    let missing: &Path = &fixture.root.path().join("nope");

    let status = fixture
        .binary()
        .env("SPLICE_PROJECT_ROOT", missing)
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));
    assert!(fixture.scratch_dirs().is_empty());
}
