//! Output formatting options.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_INDENT, DEFAULT_LINE_SEPARATOR};
use crate::sync::SyncOptions;

/// How significant text is written for nodes that are re-escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMode {
    /// Write text as read; untouched text keeps its source escaping.
    #[default]
    Preserve,
    /// Strip leading and trailing whitespace.
    Trim,
    /// Trim and collapse inner whitespace runs to one space.
    Normalize,
}

/// Formatting used when writing a document back out.
///
/// `indent` and `line_separator` shape the padding synthesized for new
/// elements; the remaining fields control the printer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputFormat {
    indent: String,
    line_separator: String,
    /// Encoding label for the declaration, `None` keeps the document's.
    encoding: Option<String>,
    omit_declaration: bool,
    omit_encoding: bool,
    text_mode: TextMode,
    expand_empty_elements: bool,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat {
            indent: DEFAULT_INDENT.to_string(),
            line_separator: DEFAULT_LINE_SEPARATOR.to_string(),
            encoding: None,
            omit_declaration: false,
            omit_encoding: false,
            text_mode: TextMode::Preserve,
            expand_empty_elements: true,
        }
    }
}

impl OutputFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_line_separator(mut self, line_separator: impl Into<String>) -> Self {
        self.line_separator = line_separator.into();
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn with_omit_declaration(mut self, omit: bool) -> Self {
        self.omit_declaration = omit;
        self
    }

    pub fn with_omit_encoding(mut self, omit: bool) -> Self {
        self.omit_encoding = omit;
        self
    }

    pub fn with_text_mode(mut self, text_mode: TextMode) -> Self {
        self.text_mode = text_mode;
        self
    }

    pub fn with_expand_empty_elements(mut self, expand: bool) -> Self {
        self.expand_empty_elements = expand;
        self
    }

    pub fn indent(&self) -> &str {
        &self.indent
    }

    pub fn line_separator(&self) -> &str {
        &self.line_separator
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn omit_declaration(&self) -> bool {
        self.omit_declaration
    }

    pub fn omit_encoding(&self) -> bool {
        self.omit_encoding
    }

    pub fn text_mode(&self) -> TextMode {
        self.text_mode
    }

    pub fn expand_empty_elements(&self) -> bool {
        self.expand_empty_elements
    }

    /// Padding settings for the synchronizers.
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions::new(self.indent.clone(), self.line_separator.clone())
    }
}
