//! XML parser that builds lossless node trees.
//!
//! This parser uses quick-xml's streaming API and slices the source around
//! every event, so start tags, escaped text, comments and the declaration
//! keep their exact source form.

use std::fs;
use std::path::Path;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, info};

use super::encoding;
use crate::document::{Document, XmlDeclaration};
use crate::error::{Error, Result};
use crate::node::{
    new_node, split_qname, Attribute, ExpandedName, NamespaceContext, NodeInner, NodeRef,
    XmlComment, XmlContent, XmlDocType, XmlElement, XmlProcessingInstruction, XmlText,
};

/// XML parser that builds node trees.
#[derive(Debug, Default)]
pub struct XmlParser;

impl XmlParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        XmlParser
    }

    /// Parses XML from a file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let path = path.as_ref();
        info!(path = %path.display(), "reading document");
        let bytes = fs::read(path)?;
        self.parse_bytes(&bytes)
    }

    /// Parses a stored document, decoding it as its declaration or byte
    /// order mark says.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Document> {
        let decoded = encoding::decode(bytes)?;
        let mut document = self.parse_str(&decoded.text)?;
        document.set_byte_order_mark(decoded.byte_order_mark);
        Ok(document)
    }

    /// Parses XML from a string.
    pub fn parse_str(&self, xml: &str) -> Result<Document> {
        let mut reader = Reader::from_str(xml);
        // Whitespace is content here; padding nodes carry the formatting
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        let document = new_node(None);
        let mut declaration = None;
        let mut node_stack: Vec<NodeRef> = vec![document.clone()];
        let mut namespaces = NamespaceContext::new();
        let mut pending_text: Option<String> = None;

        loop {
            let start = reader.buffer_position() as usize;
            let event = reader.read_event().map_err(|e| {
                debug!(position = reader.error_position(), "reader failed");
                Error::Xml(e)
            })?;
            let end = reader.buffer_position() as usize;
            let raw = &xml[start..end];

            if !matches!(event, Event::Text(_) | Event::GeneralRef(_)) {
                Self::flush_text(&mut pending_text, &node_stack)?;
            }

            match event {
                Event::Text(_) | Event::GeneralRef(_) => {
                    pending_text.get_or_insert_with(String::new).push_str(raw);
                }
                Event::Start(ref e) => {
                    let element = Self::parse_element(e, &reader, raw, false, &mut namespaces)?;
                    let node = new_node(Some(XmlContent::Element(element)));
                    NodeInner::add_child_to_ref(Self::current(&node_stack)?, node.clone())?;
                    node_stack.push(node);
                }
                Event::Empty(ref e) => {
                    let element = Self::parse_element(e, &reader, raw, true, &mut namespaces)?;
                    namespaces.pop_scope();
                    let node = new_node(Some(XmlContent::Element(element)));
                    NodeInner::add_child_to_ref(Self::current(&node_stack)?, node)?;
                }
                Event::End(_) => {
                    if node_stack.len() < 2 {
                        return Err(Error::Parse(format!("unexpected end tag `{}`", raw)));
                    }
                    namespaces.pop_scope();
                    node_stack.pop();
                }
                Event::CData(ref e) => {
                    let text = std::str::from_utf8(e.as_ref())
                        .map_err(|e| Error::Parse(e.to_string()))?;
                    let node = new_node(Some(XmlContent::Text(XmlText::cdata(text))));
                    NodeInner::add_child_to_ref(Self::current(&node_stack)?, node)?;
                }
                Event::Comment(_) => {
                    let text = Self::strip_markers(raw, "<!--", "-->")?;
                    let node = new_node(Some(XmlContent::Comment(XmlComment::new(text))));
                    NodeInner::add_child_to_ref(Self::current(&node_stack)?, node)?;
                }
                Event::PI(_) => {
                    let inner = Self::strip_markers(raw, "<?", "?>")?;
                    let node = new_node(Some(XmlContent::ProcessingInstruction(
                        XmlProcessingInstruction::from_inner(inner),
                    )));
                    NodeInner::add_child_to_ref(Self::current(&node_stack)?, node)?;
                }
                Event::DocType(_) => {
                    let node = new_node(Some(XmlContent::DocType(XmlDocType::new(raw))));
                    NodeInner::add_child_to_ref(Self::current(&node_stack)?, node)?;
                }
                Event::Decl(_) => {
                    declaration = Some(XmlDeclaration::from_raw(raw));
                }
                Event::Eof => break,
            }
        }

        if node_stack.len() > 1 {
            return Err(Error::Parse("unexpected end of document".to_string()));
        }
        debug!(
            children = document.borrow().child_count(),
            declared = declaration.is_some(),
            "parsed document"
        );
        Ok(Document::from_parts(declaration, document))
    }

    fn current(node_stack: &[NodeRef]) -> Result<&NodeRef> {
        node_stack
            .last()
            .ok_or_else(|| Error::Parse("content outside of the document".to_string()))
    }

    /// Turns accumulated raw text into a text node.
    fn flush_text(pending_text: &mut Option<String>, node_stack: &[NodeRef]) -> Result<()> {
        if let Some(raw) = pending_text.take() {
            let text = unescape(&raw)
                .map_err(|e| Error::Parse(e.to_string()))?
                .into_owned();
            let node = new_node(Some(XmlContent::Text(XmlText::from_raw(text, raw))));
            NodeInner::add_child_to_ref(Self::current(node_stack)?, node)?;
        }
        Ok(())
    }

    fn strip_markers<'a>(raw: &'a str, open: &str, close: &str) -> Result<&'a str> {
        raw.strip_prefix(open)
            .and_then(|s| s.strip_suffix(close))
            .ok_or_else(|| Error::Parse(format!("malformed markup `{}`", raw)))
    }

    /// Parses an element's name and attributes and opens its namespace scope.
    fn parse_element(
        e: &BytesStart,
        reader: &Reader<&[u8]>,
        raw: &str,
        self_closing: bool,
        namespaces: &mut NamespaceContext,
    ) -> Result<XmlElement> {
        let qname = reader
            .decoder()
            .decode(e.name().as_ref())
            .map_err(|e| Error::Parse(e.to_string()))?
            .to_string();

        namespaces.push_scope();
        let mut attributes = Vec::new();
        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|e| Error::Parse(format!("Attribute error: {}", e)))?;
            let key = reader
                .decoder()
                .decode(attr.key.as_ref())
                .map_err(|e| Error::Parse(e.to_string()))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| Error::Parse(e.to_string()))?
                .to_string();
            namespaces.bind_declaration(&key, &value);
            attributes.push(Attribute::new(key, value));
        }

        let (prefix, local) = split_qname(&qname);
        let uri = match prefix {
            Some(prefix) => namespaces.resolve(prefix).ok_or_else(|| {
                Error::Parse(format!(
                    "unbound namespace prefix `{}` on element `{}`",
                    prefix, qname
                ))
            })?,
            None => namespaces.resolve("").unwrap_or_else(|| "".into()),
        };

        Ok(XmlElement::from_source(
            prefix,
            ExpandedName::new(uri, local),
            attributes,
            raw.to_string(),
            self_closing,
        ))
    }
}

/// Parses XML from a file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    XmlParser::new().parse_file(path)
}

/// Parses a stored document.
pub fn parse_bytes(bytes: &[u8]) -> Result<Document> {
    XmlParser::new().parse_bytes(bytes)
}

/// Parses XML from a string.
pub fn parse_str(xml: &str) -> Result<Document> {
    XmlParser::new().parse_str(xml)
}
