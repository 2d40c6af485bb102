//! Fixed locations of the datastore proto and its companion module.

use std::path::{Path, PathBuf};

/// Proto search path, relative to the project root.
pub const PROTOS_DIR: &str = "googleapis-pb";

/// The proto definition, relative to [`PROTOS_DIR`].
pub const PROTO_FILE: &str = "google/datastore/v1/datastore.proto";

/// The hand-maintained gRPC module, relative to the project root.
pub const OUTPUT_FILE: &str = "datastore/google/cloud/datastore/_generated/datastore_grpc_pb2.py";

/// Python module the message types are imported from.
pub const IMPORT_MODULE: &str = "google.cloud.datastore._generated.datastore_pb2";

/// Absolute-or-relative locations resolved against one project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub protos_dir: PathBuf,
    pub proto_file: PathBuf,
    pub output_file: PathBuf,
}

impl ProjectPaths {
    pub fn new(project_root: &Path) -> Self {
        let protos_dir = project_root.join(PROTOS_DIR);
        ProjectPaths {
            proto_file: protos_dir.join(PROTO_FILE),
            output_file: project_root.join(OUTPUT_FILE),
            protos_dir,
        }
    }
}

/// Path of the `_pb2.py` module the Python plugin writes for `proto`,
/// relative to its `--python_out` directory.
pub fn generated_module_path(proto: &str) -> PathBuf {
    let stem = proto.strip_suffix(".proto").unwrap_or(proto);
    PathBuf::from(format!("{}_pb2.py", stem))
}
