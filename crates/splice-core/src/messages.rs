//! # Message-Type Extraction
//!
//! Collects the names of the message classes a plain `_pb2` module declares.
//! A declaration looks like:
//!
//! ```text
//! Entity = _reflection.GeneratedProtocolMessageType('Entity', (_message.Message,), dict(
//! ```
//!
//! Everything left of [`MESSAGE_MARKER`] is the class name.

use std::collections::BTreeSet;

use crate::error::ExtractError;
use crate::MESSAGE_MARKER;

/// Sorted, unique message-type names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTypes {
    names: BTreeSet<String>,
    duplicates: Vec<String>,
}

impl MessageTypes {
    /// Iterates names in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names that were declared more than once, in the order the repeats
    /// were seen. Each repeat is collapsed into a single import.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    fn insert(&mut self, name: &str) {
        if !self.names.insert(name.to_string()) {
            self.duplicates.push(name.to_string());
        }
    }
}

impl<'a> FromIterator<&'a str> for MessageTypes {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut types = MessageTypes::default();
        for name in iter {
            types.insert(name);
        }
        types
    }
}

/// Scans `lines` for message-type declarations.
///
/// ## Errors
/// - [`ExtractError::MalformedMarkerLine`] when the marker occurs twice on one line
/// - [`ExtractError::EmptyName`] when nothing precedes the marker
///
/// Line numbers in errors are 1-based.
pub fn extract_message_types<S: AsRef<str>>(lines: &[S]) -> Result<MessageTypes, ExtractError> {
    let mut types = MessageTypes::default();

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let mut parts = line.split(MESSAGE_MARKER);
        let name = match (parts.next(), parts.next()) {
            (Some(name), Some(_)) => name,
            _ => continue,
        };

        if parts.next().is_some() {
            return Err(ExtractError::MalformedMarkerLine {
                line_number: index + 1,
                line: line.to_string(),
            });
        }
        if name.is_empty() {
            return Err(ExtractError::EmptyName {
                line_number: index + 1,
            });
        }

        types.insert(name);
    }

    Ok(types)
}
