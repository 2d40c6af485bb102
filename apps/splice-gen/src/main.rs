//! # make-datastore-grpc
//!
//! Writes the gRPC-only lines of the datastore pb2 module into
//! `datastore/google/cloud/datastore/_generated/datastore_grpc_pb2.py`.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration (defaults, optional TOML, environment)
//! 3. Run the compiler with and without the gRPC plugin
//! 4. Write the spliced module
//!
//! A failing compiler run exits with the compiler's own status.

use std::process::ExitCode;

use tracing::{error, info, warn};

use splice_gen::{GenConfig, GenError};

fn main() -> ExitCode {
    splice_gen::init_tracing();

    let ignored: Vec<String> = std::env::args().skip(1).collect();
    if !ignored.is_empty() {
        warn!(?ignored, "make-datastore-grpc takes no arguments; ignoring them");
    }

    let result = GenConfig::from_env()
        .map_err(GenError::from)
        .and_then(|config| splice_gen::run(&config));

    match result {
        Ok(report) => {
            info!(
                output = %report.output.display(),
                grpc_only_lines = report.grpc_only_lines,
                message_types = report.message_types,
                "Done"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "make-datastore-grpc failed");
            ExitCode::from(err.exit_status())
        }
    }
}
