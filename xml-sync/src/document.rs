//! Parsed documents.

use std::io::Write;
use std::path::Path;

use crate::constants::{DEFAULT_ENCODING, DEFAULT_XML_VERSION};
use crate::error::{Error, Result};
use crate::node::{NodeRef, XmlContent};
use crate::xml::{OutputFormat, XmlParser, XmlPrinter};

/// The `<?xml ...?>` declaration of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDeclaration {
    raw: String,
    version: String,
    encoding: Option<String>,
    standalone: Option<String>,
}

impl XmlDeclaration {
    /// Builds a declaration from its parts.
    pub fn new(version: &str, encoding: Option<&str>, standalone: Option<&str>) -> Self {
        let mut raw = format!("<?xml version=\"{}\"", version);
        if let Some(encoding) = encoding {
            raw.push_str(&format!(" encoding=\"{}\"", encoding));
        }
        if let Some(standalone) = standalone {
            raw.push_str(&format!(" standalone=\"{}\"", standalone));
        }
        raw.push_str("?>");
        XmlDeclaration {
            raw,
            version: version.to_string(),
            encoding: encoding.map(str::to_string),
            standalone: standalone.map(str::to_string),
        }
    }

    /// Reads the pseudo-attributes of a declaration as written in a source.
    pub(crate) fn from_raw(raw: &str) -> Self {
        XmlDeclaration {
            raw: raw.to_string(),
            version: pseudo_attribute(raw, "version")
                .unwrap_or_else(|| DEFAULT_XML_VERSION.to_string()),
            encoding: pseudo_attribute(raw, "encoding"),
            standalone: pseudo_attribute(raw, "standalone"),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn standalone(&self) -> Option<&str> {
        self.standalone.as_deref()
    }

    /// Returns this declaration with another encoding label.
    pub fn with_encoding(&self, encoding: Option<&str>) -> Self {
        if encoding == self.encoding() {
            return self.clone();
        }
        Self::new(&self.version, encoding, self.standalone())
    }
}

impl Default for XmlDeclaration {
    fn default() -> Self {
        Self::new(DEFAULT_XML_VERSION, Some(DEFAULT_ENCODING), None)
    }
}

fn pseudo_attribute(raw: &str, name: &str) -> Option<String> {
    let mut rest = raw;
    while let Some(pos) = rest.find(name) {
        rest = &rest[pos + name.len()..];
        if let Some(value) = rest.trim_start().strip_prefix('=') {
            let value = value.trim_start();
            let quote = value.chars().next()?;
            if quote == '"' || quote == '\'' {
                let body = &value[1..];
                return body.find(quote).map(|end| body[..end].to_string());
            }
        }
    }
    None
}

/// A parsed XML document: an optional declaration plus the document node
/// holding the root element and any top-level comments, PIs and padding.
#[derive(Debug)]
pub struct Document {
    declaration: Option<XmlDeclaration>,
    node: NodeRef,
    /// Whether the stored form started with a byte order mark.
    byte_order_mark: bool,
}

impl Document {
    pub(crate) fn from_parts(declaration: Option<XmlDeclaration>, node: NodeRef) -> Self {
        Document {
            declaration,
            node,
            byte_order_mark: false,
        }
    }

    /// Parses a document from a string.
    pub fn parse_str(xml: &str) -> Result<Self> {
        XmlParser::new().parse_str(xml)
    }

    /// Parses a stored document, decoding it as its declaration says.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self> {
        XmlParser::new().parse_bytes(bytes)
    }

    /// Parses a document from a file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        XmlParser::new().parse_file(path)
    }

    pub fn declaration(&self) -> Option<&XmlDeclaration> {
        self.declaration.as_ref()
    }

    pub fn set_declaration(&mut self, declaration: Option<XmlDeclaration>) {
        self.declaration = declaration;
    }

    pub fn has_byte_order_mark(&self) -> bool {
        self.byte_order_mark
    }

    pub fn set_byte_order_mark(&mut self, byte_order_mark: bool) {
        self.byte_order_mark = byte_order_mark;
    }

    /// The document node. It has no content of its own.
    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    /// Returns the root element.
    pub fn root_element(&self) -> Result<NodeRef> {
        self.node
            .borrow()
            .children()
            .iter()
            .find(|c| c.borrow().content().is_some_and(XmlContent::is_element))
            .cloned()
            .ok_or_else(|| Error::structure("document has no root element"))
    }

    /// Serializes the document, encoded as its written declaration says.
    pub fn write_to<W: Write>(&self, writer: W, format: &OutputFormat) -> Result<()> {
        XmlPrinter::with_format(writer, format.clone()).print(self)
    }

    /// Serializes the document to text, before any encoding.
    pub fn to_xml(&self, format: &OutputFormat) -> Result<String> {
        XmlPrinter::with_format(std::io::sink(), format.clone()).render(self)
    }
}
