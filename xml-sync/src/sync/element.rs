//! Presence of singular child elements and their scalar text.

use tracing::{debug, trace};

use super::{IndentationCounter, Synchronizer};
use crate::error::Result;
use crate::node::{new_element_node, ExpandedName, NodeInner, NodeRef, XmlElement};

impl Synchronizer {
    /// Makes sure the child `name` of `parent` exists or is gone.
    ///
    /// The child is looked up in the parent's namespace. When it should
    /// exist, an existing child is reused untouched and a missing one is
    /// created at the preferred location; the counter advances either way.
    /// When it should not exist it is removed with the padding before it and
    /// the counter stays put.
    pub fn update_element(
        &self,
        counter: &mut IndentationCounter,
        parent: &NodeRef,
        name: &str,
        should_exist: bool,
    ) -> Result<Option<NodeRef>> {
        let namespace = NodeInner::namespace_of(parent);
        let existing = NodeInner::find_child(parent, name, &namespace);

        if !should_exist {
            if let Some(element) = existing {
                debug!(element = name, "removing element");
                NodeInner::detach_with_padding(&element)?;
            }
            return Ok(None);
        }

        let element = match existing {
            Some(element) => element,
            None => {
                debug!(element = name, depth = counter.depth(), "creating element");
                let element = new_element_node(Self::element_like(parent, name, &namespace));
                self.insert_at_preferred_location(parent, element.clone(), counter)?;
                element
            }
        };
        counter.increase_count();
        Ok(Some(element))
    }

    /// Sets the text of the child `name`, creating or removing the child as
    /// needed.
    ///
    /// A value equal to `default` is not written when the child is missing or
    /// already holds the default; the counter is left alone in that case. An
    /// empty string still yields an (empty) element.
    pub fn set_scalar(
        &self,
        counter: &mut IndentationCounter,
        parent: &NodeRef,
        name: &str,
        value: Option<&str>,
        default: Option<&str>,
    ) -> Result<Option<NodeRef>> {
        if let (Some(value), Some(default)) = (value, default) {
            if value == default {
                let namespace = NodeInner::namespace_of(parent);
                let existing = NodeInner::find_child(parent, name, &namespace);
                let keep = match &existing {
                    Some(element) => NodeInner::text_of(element) == default,
                    None => true,
                };
                if keep {
                    trace!(element = name, "default value left as is");
                    return Ok(existing);
                }
            }
        }

        let element = self.update_element(counter, parent, name, value.is_some())?;
        if let (Some(element), Some(value)) = (&element, value) {
            NodeInner::set_text_to_ref(element, value)?;
        }
        Ok(element)
    }

    /// A new element named `name` in the namespace of `parent`, written with
    /// the parent's prefix.
    pub(crate) fn element_like(parent: &NodeRef, name: &str, namespace: &str) -> XmlElement {
        let prefix = parent
            .borrow()
            .element()
            .and_then(|e| e.prefix().map(str::to_string));
        XmlElement::new_with_namespace(prefix.as_deref(), ExpandedName::new(namespace, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::xml::{parse_str, OutputFormat};
    use pretty_assertions::assert_eq;

    fn print(doc: &Document) -> String {
        doc.to_xml(&OutputFormat::default()).unwrap()
    }

    #[test]
    fn test_update_element_reuses_existing() {
        let doc = parse_str("<r>\n  <a>x</a>\n</r>").unwrap();
        let root = doc.root_element().unwrap();
        let mut counter = IndentationCounter::new(1);

        let a = Synchronizer::default()
            .update_element(&mut counter, &root, "a", true)
            .unwrap()
            .unwrap();
        assert_eq!(NodeInner::text_of(&a), "x");
        assert_eq!(counter.current_index(), 1);
        assert_eq!(print(&doc), "<r>\n  <a>x</a>\n</r>");
    }

    #[test]
    fn test_update_element_removes_with_padding() {
        let doc = parse_str("<r>\n  <a>x</a>\n  <b/>\n</r>").unwrap();
        let root = doc.root_element().unwrap();
        let mut counter = IndentationCounter::new(1);

        let removed = Synchronizer::default()
            .update_element(&mut counter, &root, "a", false)
            .unwrap();
        assert!(removed.is_none());
        assert_eq!(counter.current_index(), 0);
        assert_eq!(print(&doc), "<r>\n  <b/>\n</r>");
    }

    #[test]
    fn test_update_element_uses_parent_namespace() {
        let doc = parse_str("<p:r xmlns:p=\"urn:p\">\n  <a/>\n</p:r>").unwrap();
        let root = doc.root_element().unwrap();
        let mut counter = IndentationCounter::new(1);
        let sync = Synchronizer::default();

        // <a/> is in no namespace, so a new p:a is created next to it
        sync.update_element(&mut counter, &root, "a", true).unwrap();
        assert_eq!(print(&doc), "<p:r xmlns:p=\"urn:p\">\n  <p:a></p:a>\n  <a/>\n</p:r>");
    }

    #[test]
    fn test_set_scalar_default_elision() {
        let doc = parse_str("<r>\n  <a>1</a>\n</r>").unwrap();
        let root = doc.root_element().unwrap();
        let mut counter = IndentationCounter::new(1);
        let sync = Synchronizer::default();

        sync.set_scalar(&mut counter, &root, "a", Some("1"), None).unwrap();
        let packaging = sync
            .set_scalar(&mut counter, &root, "packaging", Some("jar"), Some("jar"))
            .unwrap();
        assert!(packaging.is_none());
        assert_eq!(counter.current_index(), 1);
        assert_eq!(print(&doc), "<r>\n  <a>1</a>\n</r>");
    }

    #[test]
    fn test_set_scalar_default_overwrites_other_value() {
        let doc = parse_str("<r>\n  <type>war</type>\n</r>").unwrap();
        let root = doc.root_element().unwrap();
        let mut counter = IndentationCounter::new(1);

        Synchronizer::default()
            .set_scalar(&mut counter, &root, "type", Some("jar"), Some("jar"))
            .unwrap();
        assert_eq!(print(&doc), "<r>\n  <type>jar</type>\n</r>");
    }

    #[test]
    fn test_set_scalar_absent_removes() {
        let doc = parse_str("<r>\n  <a>1</a>\n  <b>2</b>\n</r>").unwrap();
        let root = doc.root_element().unwrap();
        let mut counter = IndentationCounter::new(1);
        let sync = Synchronizer::default();

        sync.set_scalar(&mut counter, &root, "a", None, None).unwrap();
        sync.set_scalar(&mut counter, &root, "b", Some("2"), None).unwrap();
        sync.set_scalar(&mut counter, &root, "c", Some(""), None).unwrap();
        assert_eq!(print(&doc), "<r>\n  <b>2</b>\n  <c></c>\n</r>");
    }
}
