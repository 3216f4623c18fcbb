//! XML content types for tree nodes.
//!
//! This module provides `XmlContent`, which represents the content of an XML node:
//! an element (tag with attributes), text, a comment, a processing instruction or
//! a document type declaration. Content read from a document remembers its source
//! form so that untouched nodes print back byte-for-byte.

use super::namespace::{declared_prefix, ExpandedName};

/// Represents the content of an XML node.
#[derive(Debug, Clone)]
pub enum XmlContent {
    /// An XML element with a qualified name and attributes.
    Element(XmlElement),
    /// XML text content, plain or CDATA.
    Text(XmlText),
    /// XML comment.
    Comment(XmlComment),
    /// XML processing instruction.
    ProcessingInstruction(XmlProcessingInstruction),
    /// Document type declaration, kept verbatim.
    DocType(XmlDocType),
}

impl XmlContent {
    /// Returns true if this is an element node.
    pub fn is_element(&self) -> bool {
        matches!(self, XmlContent::Element(_))
    }

    /// Returns true if this is a text node.
    pub fn is_text(&self) -> bool {
        matches!(self, XmlContent::Text(_))
    }

    /// Returns true if this is a comment node.
    pub fn is_comment(&self) -> bool {
        matches!(self, XmlContent::Comment(_))
    }

    /// Returns true for whitespace-only, non-CDATA text.
    pub fn is_padding(&self) -> bool {
        matches!(self, XmlContent::Text(t) if t.is_padding())
    }

    /// Returns a reference to the element, if this is an element node.
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlContent::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Returns a mutable reference to the element, if this is an element node.
    pub fn as_element_mut(&mut self) -> Option<&mut XmlElement> {
        match self {
            XmlContent::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Returns a reference to the text, if this is a text node.
    pub fn as_text(&self) -> Option<&XmlText> {
        match self {
            XmlContent::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Returns a mutable reference to the text, if this is a text node.
    pub fn as_text_mut(&mut self) -> Option<&mut XmlText> {
        match self {
            XmlContent::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// A single attribute, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified attribute name as written.
    pub name: String,
    /// Unescaped attribute value.
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Attribute {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An XML element with a qualified name and attributes.
#[derive(Debug, Clone)]
pub struct XmlElement {
    /// Prefix the element was written with, if any.
    prefix: Option<String>,
    /// The expanded name (namespace URI + local name).
    name: ExpandedName,
    /// Attributes in source order, namespace declarations included.
    attributes: Vec<Attribute>,
    /// The start tag exactly as it appeared in the source. Cleared on any
    /// change to the name or attributes.
    raw_start: Option<String>,
    /// Whether the source wrote this element as `<a/>`. `None` for elements
    /// created after parsing.
    self_closing: Option<bool>,
}

impl XmlElement {
    /// Creates a new element without a namespace.
    pub fn new(local_name: impl Into<String>) -> Self {
        Self::new_with_namespace(None, ExpandedName::no_namespace(local_name))
    }

    /// Creates a new element with namespace information.
    pub fn new_with_namespace(prefix: Option<&str>, name: ExpandedName) -> Self {
        XmlElement {
            prefix: prefix.map(str::to_string),
            name,
            attributes: Vec::new(),
            raw_start: None,
            self_closing: None,
        }
    }

    /// Creates an element exactly as read from a document.
    pub(crate) fn from_source(
        prefix: Option<&str>,
        name: ExpandedName,
        attributes: Vec<Attribute>,
        raw_start: String,
        self_closing: bool,
    ) -> Self {
        XmlElement {
            prefix: prefix.map(str::to_string),
            name,
            attributes,
            raw_start: Some(raw_start),
            self_closing: Some(self_closing),
        }
    }

    /// Returns the qualified name of the element (e.g. `div`, `ns:element`).
    pub fn qname(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.name.local_name),
            None => self.name.local_name.clone(),
        }
    }

    /// Returns the local part of the name.
    pub fn local_name(&self) -> &str {
        &self.name.local_name
    }

    /// Returns the prefix, if the element has one.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Returns the namespace URI (empty for no namespace).
    pub fn namespace_uri(&self) -> &str {
        &self.name.namespace_uri
    }

    /// Returns the expanded name.
    pub fn expanded_name(&self) -> &ExpandedName {
        &self.name
    }

    /// Returns true if this element has the given local name and namespace.
    pub fn names_match(&self, local_name: &str, namespace_uri: &str) -> bool {
        self.name.local_name == local_name && &*self.name.namespace_uri == namespace_uri
    }

    /// Returns the attributes in source order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns the value of the attribute with the given qualified name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Sets an attribute, appending it when new. Returns true if anything
    /// changed; an unchanged value keeps the raw start tag.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> bool {
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) if existing.value == value => false,
            Some(existing) => {
                existing.value = value.to_string();
                self.raw_start = None;
                true
            }
            None => {
                self.attributes.push(Attribute::new(name, value));
                self.raw_start = None;
                true
            }
        }
    }

    /// Returns the namespace declarations on this element as
    /// `(prefix, uri)` pairs; the default namespace has an empty prefix.
    pub fn namespace_decls(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .filter_map(|a| declared_prefix(&a.name).map(|prefix| (prefix, a.value.as_str())))
    }

    /// Returns the start tag as read from the source, while still valid.
    pub fn raw_start(&self) -> Option<&str> {
        self.raw_start.as_deref()
    }

    /// Returns how the source wrote this element, `None` for new elements.
    pub fn self_closing(&self) -> Option<bool> {
        self.self_closing
    }
}

impl std::fmt::Display for XmlElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {{", self.qname())?;
        for attr in &self.attributes {
            write!(f, " {}={}", attr.name, attr.value)?;
        }
        write!(f, " }}")
    }
}

/// XML text content.
#[derive(Debug, Clone)]
pub struct XmlText {
    /// The unescaped text.
    text: String,
    /// The escaped form read from the source, dropped once the text changes.
    raw: Option<String>,
    /// Whether this text is a CDATA section.
    cdata: bool,
}

impl XmlText {
    /// Creates a plain text node.
    pub fn new(text: &str) -> Self {
        XmlText {
            text: text.to_string(),
            raw: None,
            cdata: false,
        }
    }

    /// Creates a CDATA section.
    pub fn cdata(text: &str) -> Self {
        XmlText {
            text: text.to_string(),
            raw: None,
            cdata: true,
        }
    }

    /// Creates a plain text node that remembers its escaped source form.
    pub(crate) fn from_raw(text: String, raw: String) -> Self {
        XmlText {
            text,
            raw: Some(raw),
            cdata: false,
        }
    }

    /// Returns the unescaped text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the escaped source form, if the text is unchanged.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Returns true for a CDATA section.
    pub fn is_cdata(&self) -> bool {
        self.cdata
    }

    /// Replaces the text, keeping the CDATA flag.
    pub fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_string();
            self.raw = None;
        }
    }

    /// Whitespace-only text that is not CDATA only carries formatting.
    pub fn is_padding(&self) -> bool {
        !self.cdata && self.text.chars().all(char::is_whitespace)
    }
}

impl std::fmt::Display for XmlText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// XML comment content.
#[derive(Debug, Clone)]
pub struct XmlComment {
    /// The comment text (without the <!-- and --> markers).
    text: String,
}

impl XmlComment {
    pub fn new(text: &str) -> Self {
        XmlComment {
            text: text.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for XmlComment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<!--{}-->", self.text)
    }
}

/// XML processing instruction content.
#[derive(Debug, Clone)]
pub struct XmlProcessingInstruction {
    /// The target of the PI (e.g., "xml-stylesheet").
    target: String,
    /// Everything after the target, leading whitespace included.
    content: String,
}

impl XmlProcessingInstruction {
    /// Creates a new PI from target and content strings.
    pub fn new(target: &str, content: &str) -> Self {
        let content = if content.is_empty() {
            String::new()
        } else {
            format!(" {}", content)
        };
        XmlProcessingInstruction {
            target: target.to_string(),
            content,
        }
    }

    /// Splits the text between `<?` and `?>` into target and content.
    pub(crate) fn from_inner(inner: &str) -> Self {
        let split = inner
            .find(|c: char| c.is_whitespace())
            .unwrap_or(inner.len());
        XmlProcessingInstruction {
            target: inner[..split].to_string(),
            content: inner[split..].to_string(),
        }
    }

    /// Returns the PI target.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the PI content.
    pub fn content(&self) -> &str {
        self.content.trim_start()
    }
}

impl std::fmt::Display for XmlProcessingInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<?{}{}?>", self.target, self.content)
    }
}

/// A `<!DOCTYPE ...>` declaration.
#[derive(Debug, Clone)]
pub struct XmlDocType {
    raw: String,
}

impl XmlDocType {
    pub(crate) fn new(raw: &str) -> Self {
        XmlDocType {
            raw: raw.to_string(),
        }
    }
}

impl std::fmt::Display for XmlDocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}
