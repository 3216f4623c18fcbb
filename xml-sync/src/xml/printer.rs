//! XML printer that outputs node trees.
//!
//! Untouched nodes are written from their source form, so a document that
//! was parsed and not modified prints back byte-for-byte. Modified and new
//! nodes are rebuilt and re-escaped according to the `OutputFormat`. The
//! rendered text is then encoded as the written declaration says.

use std::io::Write;

use tracing::trace;

use super::encoding;
use super::format::{OutputFormat, TextMode};
use crate::constants::XMLNS;
use crate::document::{Document, XmlDeclaration};
use crate::error::{Error, Result};
use crate::node::{NamespaceContext, NodeRef, XmlContent, XmlElement, XmlText};

/// XML printer that outputs node trees.
pub struct XmlPrinter<W: Write> {
    writer: W,
    format: OutputFormat,
    /// Bindings in scope at the element being printed.
    namespaces: NamespaceContext,
    /// Rendered text, encoded once the document is complete.
    buffer: Vec<u8>,
}

impl<W: Write> XmlPrinter<W> {
    /// Creates a new XML printer with default formatting.
    pub fn new(writer: W) -> Self {
        Self::with_format(writer, OutputFormat::default())
    }

    /// Creates a new XML printer with the given format.
    pub fn with_format(writer: W, format: OutputFormat) -> Self {
        XmlPrinter {
            writer,
            format,
            namespaces: NamespaceContext::new(),
            buffer: Vec::new(),
        }
    }

    /// Prints a document to the output, encoded as its written declaration
    /// says. Without an encoding label the output is UTF-8.
    pub fn print(&mut self, document: &Document) -> Result<()> {
        let text = self.render(document)?;
        let bytes = encoding::encode(
            &text,
            self.written_encoding(document),
            document.has_byte_order_mark(),
        )?;
        self.writer.write_all(&bytes)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Renders a document as text without encoding it.
    pub fn render(&mut self, document: &Document) -> Result<String> {
        self.buffer.clear();
        if let Some(declaration) = document.declaration() {
            if !self.format.omit_declaration() {
                self.print_declaration(declaration)?;
            }
        }
        let children = document.node().borrow().children().to_vec();
        for child in &children {
            self.print_node(child)?;
        }
        String::from_utf8(std::mem::take(&mut self.buffer)).map_err(|e| Error::Parse(e.to_string()))
    }

    /// The encoding label the printed declaration carries, if any.
    fn written_encoding<'a>(&'a self, document: &'a Document) -> Option<&'a str> {
        let declaration = document.declaration()?;
        if self.format.omit_declaration() || self.format.omit_encoding() {
            return None;
        }
        self.format.encoding().or(declaration.encoding())
    }

    fn print_declaration(&mut self, declaration: &XmlDeclaration) -> Result<()> {
        let wanted = if self.format.omit_encoding() {
            None
        } else {
            self.format.encoding().or(declaration.encoding())
        };
        let declaration = declaration.with_encoding(wanted);
        write!(self.buffer, "{}", declaration.raw())?;
        Ok(())
    }

    fn print_node(&mut self, node: &NodeRef) -> Result<()> {
        let borrowed = node.borrow();
        match borrowed.content() {
            Some(XmlContent::Element(element)) => self.print_element(element, borrowed.children()),
            Some(XmlContent::Text(text)) => self.print_text(text),
            Some(XmlContent::Comment(comment)) => {
                write!(self.buffer, "{}", comment)?;
                Ok(())
            }
            Some(XmlContent::ProcessingInstruction(pi)) => {
                write!(self.buffer, "{}", pi)?;
                Ok(())
            }
            Some(XmlContent::DocType(doctype)) => {
                write!(self.buffer, "{}", doctype)?;
                Ok(())
            }
            None => {
                for child in borrowed.children() {
                    self.print_node(child)?;
                }
                Ok(())
            }
        }
    }

    fn print_element(&mut self, element: &XmlElement, children: &[NodeRef]) -> Result<()> {
        self.namespaces.push_scope();
        for (prefix, uri) in element.namespace_decls() {
            self.namespaces.bind(prefix, uri);
        }

        let empty = children.is_empty();
        let closed = match element.raw_start() {
            Some(raw) if element.self_closing() == Some(empty) => {
                self.buffer.write_all(raw.as_bytes())?;
                empty
            }
            _ => self.start_element(element, empty)?,
        };

        if !closed {
            for child in children {
                self.print_node(child)?;
            }
            write!(self.buffer, "</{}>", element.qname())?;
        }

        self.namespaces.pop_scope();
        Ok(())
    }

    /// Writes a rebuilt start tag. Returns true if the tag was self-closed.
    fn start_element(&mut self, element: &XmlElement, empty: bool) -> Result<bool> {
        let qname = element.qname();
        trace!(element = %qname, "rebuilding start tag");

        let mut tag = String::new();
        tag.push('<');
        tag.push_str(&qname);

        // New elements may carry a namespace nothing in scope declares
        let prefix = element.prefix().unwrap_or("");
        let uri = element.namespace_uri();
        let declared = match self.namespaces.resolve(prefix) {
            Some(bound) => &*bound == uri,
            None => uri.is_empty(),
        };
        if !declared {
            let name = if prefix.is_empty() {
                XMLNS.to_string()
            } else {
                format!("{}:{}", XMLNS, prefix)
            };
            push_attribute(&mut tag, &name, uri);
            self.namespaces.bind(prefix, uri);
        }

        for attr in element.attributes() {
            push_attribute(&mut tag, &attr.name, &attr.value);
        }

        let self_close = empty
            && match element.self_closing() {
                Some(self_closing) => self_closing,
                None => !self.format.expand_empty_elements(),
            };
        if self_close {
            tag.push_str("/>");
        } else {
            tag.push('>');
        }
        self.buffer.write_all(tag.as_bytes())?;
        Ok(self_close)
    }

    fn print_text(&mut self, text: &XmlText) -> Result<()> {
        if text.is_cdata() {
            write!(self.buffer, "<![CDATA[{}]]>", text.text())?;
            return Ok(());
        }
        let encoded = match (self.format.text_mode(), text.raw()) {
            (TextMode::Preserve, Some(raw)) => raw.to_string(),
            (TextMode::Preserve, None) => to_entities(text.text(), false),
            _ if text.is_padding() => text.raw().unwrap_or(text.text()).to_string(),
            (TextMode::Trim, _) => to_entities(text.text().trim(), false),
            (TextMode::Normalize, _) => to_entities(&normalize_whitespace(text.text()), false),
        };
        self.buffer.write_all(encoded.as_bytes())?;
        Ok(())
    }
}

fn push_attribute(tag: &mut String, name: &str, value: &str) {
    tag.push(' ');
    tag.push_str(name);
    tag.push_str("=\"");
    tag.push_str(&to_entities(value, true));
    tag.push('"');
}

/// Converts special characters to XML entities. Quotes are only escaped
/// inside attribute values.
fn to_entities(s: &str, in_attribute: bool) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if in_attribute => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

/// Collapses whitespace runs to a single space and trims both ends.
fn normalize_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_was_ws = true;
    for c in text.chars() {
        if c.is_whitespace() {
            if !last_was_ws {
                result.push(' ');
                last_was_ws = true;
            }
            // Skip additional whitespace
        } else {
            result.push(c);
            last_was_ws = false;
        }
    }
    if result.ends_with(' ') {
        result.pop();
    }
    result
}

/// Renders a document to a string.
pub fn print_to_string(document: &Document, format: &OutputFormat) -> Result<String> {
    document.to_xml(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{new_element_node, new_text_node, ExpandedName, NodeInner};
    use crate::xml::parse_str;

    fn print(document: &Document) -> String {
        print_to_string(document, &OutputFormat::default()).unwrap()
    }

    #[test]
    fn test_round_trip_is_byte_identical() {
        let xml = "<?xml version='1.0' encoding='UTF-8'?>\n<!DOCTYPE r>\n<r a='x&amp;y'  b=\"2\">\n  <!--c-->\n  <e/>\n  <f></f>\n  <![CDATA[ a<b ]]>&#65;&amp;\n  <?pi  x?>\n</r>\n";
        let doc = parse_str(xml).unwrap();
        assert_eq!(print(&doc), xml);
    }

    #[test]
    fn test_modified_attribute_rebuilds_tag() {
        let doc = parse_str("<r><e  a='1'  b=\"2\"/></r>").unwrap();
        let e = NodeInner::element_children(&doc.root_element().unwrap())[0].clone();
        e.borrow_mut()
            .element_mut()
            .unwrap()
            .set_attribute("a", "<3>");
        assert_eq!(print(&doc), "<r><e a=\"&lt;3&gt;\" b=\"2\"/></r>");
    }

    #[test]
    fn test_new_empty_elements() {
        let doc = parse_str("<r></r>").unwrap();
        let root = doc.root_element().unwrap();
        NodeInner::add_child_to_ref(&root, new_element_node(XmlElement::new("a"))).unwrap();

        assert_eq!(print(&doc), "<r><a></a></r>");
        let collapsed = OutputFormat::default().with_expand_empty_elements(false);
        assert_eq!(print_to_string(&doc, &collapsed).unwrap(), "<r><a/></r>");
    }

    #[test]
    fn test_self_closing_source_gains_children() {
        let doc = parse_str("<r><a x=\"1\"/></r>").unwrap();
        let a = NodeInner::element_children(&doc.root_element().unwrap())[0].clone();
        NodeInner::add_child_to_ref(&a, new_text_node("v")).unwrap();
        assert_eq!(print(&doc), "<r><a x=\"1\">v</a></r>");
    }

    #[test]
    fn test_missing_namespace_declared() {
        let doc = parse_str("<r xmlns:m=\"urn:m\"><m:a/></r>").unwrap();
        let root = doc.root_element().unwrap();
        let bound = XmlElement::new_with_namespace(Some("m"), ExpandedName::new("urn:m", "b"));
        let unbound = XmlElement::new_with_namespace(Some("z"), ExpandedName::new("urn:z", "c"));
        NodeInner::add_child_to_ref(&root, new_element_node(bound)).unwrap();
        NodeInner::add_child_to_ref(&root, new_element_node(unbound)).unwrap();

        assert_eq!(
            print(&doc),
            "<r xmlns:m=\"urn:m\"><m:a/><m:b></m:b><z:c xmlns:z=\"urn:z\"></z:c></r>"
        );
    }

    #[test]
    fn test_text_modes() {
        let doc = parse_str("<r>\n  <a>  x \n  y </a>\n</r>").unwrap();
        let trim = OutputFormat::default().with_text_mode(TextMode::Trim);
        let normalize = OutputFormat::default().with_text_mode(TextMode::Normalize);

        assert_eq!(
            print_to_string(&doc, &trim).unwrap(),
            "<r>\n  <a>x \n  y</a>\n</r>"
        );
        assert_eq!(
            print_to_string(&doc, &normalize).unwrap(),
            "<r>\n  <a>x y</a>\n</r>"
        );
    }

    #[test]
    fn test_declaration_options() {
        let doc = parse_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?><r/>").unwrap();

        let omitted = OutputFormat::default().with_omit_declaration(true);
        assert_eq!(print_to_string(&doc, &omitted).unwrap(), "<r/>");

        let relabeled = OutputFormat::default().with_encoding("ISO-8859-1");
        assert_eq!(
            print_to_string(&doc, &relabeled).unwrap(),
            "<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><r/>"
        );

        let no_encoding = OutputFormat::default().with_omit_encoding(true);
        assert_eq!(
            print_to_string(&doc, &no_encoding).unwrap(),
            "<?xml version=\"1.0\"?><r/>"
        );
    }

    #[test]
    fn test_print_encodes_as_declared() {
        let doc = parse_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?><n>Caf\u{e9}</n>").unwrap();

        let mut utf8 = Vec::new();
        XmlPrinter::new(&mut utf8).print(&doc).unwrap();
        assert_eq!(utf8, "<?xml version=\"1.0\" encoding=\"UTF-8\"?><n>Caf\u{e9}</n>".as_bytes());

        let mut latin1 = Vec::new();
        let relabeled = OutputFormat::default().with_encoding("ISO-8859-1");
        XmlPrinter::with_format(&mut latin1, relabeled).print(&doc).unwrap();
        assert_eq!(latin1, b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><n>Caf\xE9</n>");

        // no label is written, so neither is anything but UTF-8
        let mut unlabeled = Vec::new();
        let omitted = OutputFormat::default().with_encoding("ISO-8859-1").with_omit_encoding(true);
        XmlPrinter::with_format(&mut unlabeled, omitted).print(&doc).unwrap();
        assert_eq!(unlabeled, "<?xml version=\"1.0\"?><n>Caf\u{e9}</n>".as_bytes());
    }

    #[test]
    fn test_unwritable_encoding_is_error() {
        let doc = parse_str("<?xml version=\"1.0\"?><r/>").unwrap();
        let format = OutputFormat::default().with_encoding("no-such-charset");
        let result = XmlPrinter::with_format(Vec::new(), format).print(&doc);
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \t b\n"), "a b");
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn test_entity_encoding() {
        assert_eq!(to_entities("a<b & \"c\"", false), "a&lt;b &amp; \"c\"");
        assert_eq!(to_entities("\"q\"", true), "&quot;q&quot;");
    }
}
