//! Error types for xml-sync.

use thiserror::Error;

/// Result type alias for xml-sync operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, synchronizing or writing a document.
#[derive(Error, Debug)]
pub enum Error {
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    Parse(String),

    /// The tree rejected an insert or remove, or is missing something the
    /// synchronizers rely on (a root element, a namespace binding).
    #[error("Structural fault: {0}")]
    Structure(String),

    /// Bytes that do not decode in the document's encoding, or an encoding
    /// that cannot be read or written.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A logical value does not have the shape its field declares.
    #[error("Model error in field `{field}`: {message}")]
    Model { field: String, message: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML error from quick-xml.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// JSON error while loading a model.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn structure(message: impl Into<String>) -> Self {
        Error::Structure(message.into())
    }

    pub(crate) fn model(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Model {
            field: field.into(),
            message: message.into(),
        }
    }
}
