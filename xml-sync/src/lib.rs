//! xml-sync - Format-preserving model synchronization for XML descriptors
//!
//! This library writes an in-memory object model into an existing XML
//! document while disturbing as little of the original text as possible.
//!
//! # Overview
//!
//! Serializing a model from scratch loses everything the model does not
//! capture: comments, the order of unknown elements, blank lines, attribute
//! quoting and the indentation style of the file. Instead, xml-sync parses
//! the existing document into a lossless tree, compares each logical field
//! of the model with the matching part of that tree, and edits only where
//! the two differ. New elements are placed after the siblings that precede
//! them in the model and indented like their neighbours.
//!
//! # Key Features
//!
//! - Untouched documents print back byte-for-byte
//! - Comments, processing instructions and unknown elements are kept
//! - Default values are not written unless already present
//! - Free-form configuration trees are merged by element name
//! - Built-in schemas for `pom.xml`, `settings.xml`, `toolchains.xml` and
//!   `maven-metadata.xml`
//!
//! # Example
//!
//! ```
//! use xml_sync::{schema, Document, ModelWriter, Record};
//!
//! let mut document = Document::parse_str(
//!     "<project>\n  <!-- coordinates -->\n  <artifactId>demo</artifactId>\n</project>",
//! )?;
//! let model = Record::new()
//!     .with("artifactId", "demo")
//!     .with("version", "1.0");
//!
//! let xml = ModelWriter::new(&schema::project::PROJECT).to_string(&model, &mut document)?;
//! assert_eq!(
//!     xml,
//!     "<project>\n  <!-- coordinates -->\n  <artifactId>demo</artifactId>\n  <version>1.0</version>\n</project>"
//! );
//! # Ok::<(), xml_sync::Error>(())
//! ```

pub mod constants;
pub mod document;
pub mod error;
pub mod model;
pub mod node;
pub mod schema;
pub mod sync;
pub mod writer;
pub mod xml;

// Re-export commonly used types
pub use constants::*;
pub use document::{Document, XmlDeclaration};
pub use error::{Error, Result};
pub use model::{FreeformNode, Model, Properties, Record, Value};
pub use node::{NodeInner, NodeRef, XmlContent, XmlElement, XmlText};
pub use schema::{Field, FieldKind, Schema};
pub use sync::{IndentationCounter, SyncOptions, Synchronizer};
pub use writer::{DocumentModifier, ModelWriter};
pub use xml::{parse_bytes, parse_file, parse_str, OutputFormat, TextMode, XmlParser, XmlPrinter};
