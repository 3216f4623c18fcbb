//! Format-preserving synchronization primitives.
//!
//! Each primitive compares one logical value with the matching part of an
//! existing element tree and changes only what differs. Existing nodes are
//! reused in place; new nodes are inserted at the position the
//! [`IndentationCounter`] points to, with padding copied from their siblings.
//! The schema walker in [`crate::schema`] drives these per field.

mod counter;
mod element;
mod freeform;
mod list;
mod locator;
mod properties;

pub use counter::IndentationCounter;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_INDENT, DEFAULT_LINE_SEPARATOR};

/// Padding used for text the synchronizers have to synthesize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOptions {
    indent: String,
    line_separator: String,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions {
            indent: DEFAULT_INDENT.to_string(),
            line_separator: DEFAULT_LINE_SEPARATOR.to_string(),
        }
    }
}

impl SyncOptions {
    pub fn new(indent: impl Into<String>, line_separator: impl Into<String>) -> Self {
        SyncOptions {
            indent: indent.into(),
            line_separator: line_separator.into(),
        }
    }

    pub fn indent(&self) -> &str {
        &self.indent
    }

    pub fn line_separator(&self) -> &str {
        &self.line_separator
    }
}

/// Entry point for the synchronization primitives.
///
/// Holds no state besides its options; every operation works on the tree it
/// is given and the counter of the level it is called for.
#[derive(Debug, Clone, Default)]
pub struct Synchronizer {
    options: SyncOptions,
}

impl Synchronizer {
    pub fn new(options: SyncOptions) -> Self {
        Synchronizer { options }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }
}
