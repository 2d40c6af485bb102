//! # Splice Document
//!
//! Renders the hand-maintained companion module:
//!
//! ```text
//! # BEGIN: Imports from datastore_pb2
//! from <module> import Bar
//! from <module> import Foo
//! #   END: Imports from datastore_pb2
//! <gRPC-only lines, verbatim>
//! ```

use std::fmt;

use crate::messages::MessageTypes;
use crate::{IMPORTS_FOOTER, IMPORTS_HEADER};

/// The output file, borrowed from the pipeline's intermediate results.
#[derive(Debug, Clone, Copy)]
pub struct SpliceDocument<'a> {
    /// Dotted path of the plain generated module the names are imported from.
    pub import_module: &'a str,
    pub message_types: &'a MessageTypes,
    pub grpc_only: &'a [&'a str],
}

impl<'a> SpliceDocument<'a> {
    pub fn new(
        import_module: &'a str,
        message_types: &'a MessageTypes,
        grpc_only: &'a [&'a str],
    ) -> Self {
        SpliceDocument {
            import_module,
            message_types,
            grpc_only,
        }
    }

    /// Renders the document to a string.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

/// Formats a single `from <module> import <name>` line.
pub fn import_line(module: &str, name: &str) -> String {
    format!("from {} import {}\n", module, name)
}

impl fmt::Display for SpliceDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(IMPORTS_HEADER)?;
        for name in self.message_types.iter() {
            f.write_str(&import_line(self.import_module, name))?;
        }
        f.write_str(IMPORTS_FOOTER)?;
        for line in self.grpc_only {
            f.write_str(line)?;
        }
        Ok(())
    }
}
