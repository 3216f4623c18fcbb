//! Constants used throughout xml-sync.
//!
//! These are the formatting defaults the synchronizers and the printer fall
//! back to when no explicit configuration is given.

/// Indentation unit used when a new element has no sibling padding to copy.
pub const DEFAULT_INDENT: &str = "  ";

/// Line separator used when synthesizing padding text.
pub const DEFAULT_LINE_SEPARATOR: &str = "\n";

/// Encoding label written into a synthesized XML declaration.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// XML version written into a synthesized XML declaration.
pub const DEFAULT_XML_VERSION: &str = "1.0";

/// Namespace bound to the reserved `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Attribute name (or prefix) that declares a namespace.
pub const XMLNS: &str = "xmlns";
