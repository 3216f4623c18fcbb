//! Namespace names and the prefix bindings in scope while walking a tree.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::constants::{XMLNS, XML_NAMESPACE};

/// An element name resolved against the bindings in scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpandedName {
    /// Empty for elements in no namespace.
    pub namespace_uri: Rc<str>,
    pub local_name: String,
}

impl ExpandedName {
    pub fn new(uri: impl Into<Rc<str>>, local: impl Into<String>) -> Self {
        ExpandedName {
            namespace_uri: uri.into(),
            local_name: local.into(),
        }
    }

    pub fn no_namespace(local: impl Into<String>) -> Self {
        Self::new("", local)
    }
}

/// Prefix bindings in scope, one frame per open element.
///
/// Every prefix maps to the URIs bound to it, innermost last, so resolving
/// is one lookup. A frame records the prefixes it bound and closing it
/// unwinds only those. The default namespace is the empty prefix.
#[derive(Debug)]
pub struct NamespaceContext {
    bindings: FxHashMap<String, Vec<Rc<str>>>,
    frames: Vec<Vec<String>>,
}

impl Default for NamespaceContext {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceContext {
    /// A context where only the `xml` prefix is bound.
    pub fn new() -> Self {
        let mut bindings = FxHashMap::default();
        bindings.insert("xml".to_string(), vec![Rc::from(XML_NAMESPACE)]);
        NamespaceContext {
            bindings,
            frames: Vec::new(),
        }
    }

    /// Opens a frame for an element.
    pub fn push_scope(&mut self) {
        self.frames.push(Vec::new());
    }

    /// Closes the innermost frame, dropping what it bound.
    pub fn pop_scope(&mut self) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        for prefix in frame {
            if let Some(uris) = self.bindings.get_mut(&prefix) {
                uris.pop();
            }
        }
    }

    /// Binds `prefix` in the innermost frame. Outside any frame the binding
    /// is permanent.
    pub fn bind(&mut self, prefix: &str, uri: &str) {
        self.bindings
            .entry(prefix.to_string())
            .or_default()
            .push(Rc::from(uri));
        if let Some(frame) = self.frames.last_mut() {
            frame.push(prefix.to_string());
        }
    }

    /// Binds the namespace an attribute declares, if it declares one.
    pub fn bind_declaration(&mut self, name: &str, value: &str) {
        if let Some(prefix) = declared_prefix(name) {
            self.bind(prefix, value);
        }
    }

    pub fn resolve(&self, prefix: &str) -> Option<Rc<str>> {
        self.bindings.get(prefix).and_then(|uris| uris.last()).cloned()
    }
}

/// Splits `prefix:local`; a name without a colon has no prefix.
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    match qname.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, qname),
    }
}

/// The prefix an `xmlns` or `xmlns:p` attribute declares, `""` for the
/// default namespace.
pub fn declared_prefix(name: &str) -> Option<&str> {
    match name.strip_prefix(XMLNS)? {
        "" => Some(""),
        rest => rest.strip_prefix(':'),
    }
}

pub fn is_xmlns_attr(name: &str) -> bool {
    declared_prefix(name).is_some()
}
