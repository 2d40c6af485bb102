//! # Generated Source
//!
//! A generated `_pb2` module held in memory as text, viewed as lines.
//!
//! Lines keep their `\n` terminator, so joining them reproduces the file
//! byte for byte and the gRPC-only lines can be written out verbatim.

/// The full text of one generated module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedSource {
    text: String,
}

impl GeneratedSource {
    /// Wraps the text of a generated module.
    pub fn new(text: impl Into<String>) -> Self {
        GeneratedSource { text: text.into() }
    }

    /// Returns the raw text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Splits the text into lines, each keeping its trailing `\n`.
    ///
    /// A final line without a terminator is still returned. An empty module
    /// has no lines.
    pub fn lines(&self) -> Vec<&str> {
        self.text.split_inclusive('\n').collect()
    }

    /// Number of lines, counted the same way as [`lines`](Self::lines).
    pub fn line_count(&self) -> usize {
        self.text.split_inclusive('\n').count()
    }
}

impl From<String> for GeneratedSource {
    fn from(text: String) -> Self {
        GeneratedSource::new(text)
    }
}
