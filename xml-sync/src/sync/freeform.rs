//! Name-matched merging of schema-free element trees.

use tracing::{debug, trace};

use super::{IndentationCounter, Synchronizer};
use crate::constants::XMLNS;
use crate::error::{Error, Result};
use crate::model::FreeformNode;
use crate::node::{
    is_xmlns_attr, new_element_node, split_qname, ExpandedName, NodeInner, NodeRef, XmlContent,
    XmlElement,
};

impl Synchronizer {
    /// Merges `tree` into the `name` child of `parent`.
    ///
    /// The child exists exactly when the tree has children or a value of its
    /// own.
    pub fn merge_freeform(
        &self,
        counter: &mut IndentationCounter,
        parent: &NodeRef,
        name: &str,
        tree: Option<&FreeformNode>,
    ) -> Result<Option<NodeRef>> {
        let should_exist = tree.is_some_and(FreeformNode::has_content);
        let element = self.update_element(counter, parent, name, should_exist)?;
        if let (Some(element), Some(tree)) = (&element, tree) {
            self.replace_freeform(element, tree, counter.nested())?;
        }
        Ok(element)
    }

    /// Merges the attributes, children and value of `tree` into `element`.
    ///
    /// Existing children are paired with the first unused entry of the same
    /// name; children without an entry are removed and entries without a
    /// child are created. Attributes are only ever added or overwritten.
    pub fn replace_freeform(
        &self,
        element: &NodeRef,
        tree: &FreeformNode,
        counter: IndentationCounter,
    ) -> Result<()> {
        self.replace_freeform_in(element, tree, &[], counter)
    }

    fn replace_freeform_in(
        &self,
        element: &NodeRef,
        tree: &FreeformNode,
        ancestors: &[&FreeformNode],
        mut counter: IndentationCounter,
    ) -> Result<()> {
        Self::merge_attributes(element, tree);

        if !tree.children.is_empty() {
            let mut lineage = ancestors.to_vec();
            lineage.push(tree);
            let mut pending: Vec<&FreeformNode> = tree.children.iter().collect();

            for existing in NodeInner::element_children(element) {
                let qname = existing
                    .borrow()
                    .element()
                    .map(XmlElement::qname)
                    .unwrap_or_default();
                match pending.iter().position(|entry| entry.name == qname) {
                    Some(pos) => {
                        let entry = pending.remove(pos);
                        trace!(element = %qname, "matched freeform entry");
                        self.replace_freeform_in(&existing, entry, &lineage, counter.nested())?;
                        counter.increase_count();
                    }
                    None => {
                        debug!(element = %qname, "removing unmatched element");
                        NodeInner::detach_with_padding(&existing)?;
                    }
                }
            }

            for entry in pending {
                debug!(element = %entry.name, depth = counter.depth(), "creating freeform element");
                let child = new_element_node(Self::freeform_element(element, entry, &lineage)?);
                self.insert_at_preferred_location(element, child.clone(), &counter)?;
                counter.increase_count();
                self.replace_freeform_in(&child, entry, &lineage, counter.nested())?;
            }
        } else if let Some(value) = &tree.value {
            Self::replace_leaf_text(element, value)?;
        }
        Ok(())
    }

    /// CDATA sections keep their form; their text is only replaced when it
    /// differs from `value` beyond surrounding whitespace.
    fn replace_leaf_text(element: &NodeRef, value: &str) -> Result<()> {
        let cdata: Vec<NodeRef> = element
            .borrow()
            .children()
            .iter()
            .filter(|c| {
                c.borrow()
                    .content()
                    .and_then(XmlContent::as_text)
                    .is_some_and(|t| t.is_cdata())
            })
            .cloned()
            .collect();

        if cdata.is_empty() {
            return NodeInner::set_text_to_ref(element, value);
        }
        for node in cdata {
            let mut node = node.borrow_mut();
            if let Some(text) = node.content_mut().and_then(XmlContent::as_text_mut) {
                if text.text().trim() != value {
                    text.set_text(value);
                }
            }
        }
        Ok(())
    }

    fn merge_attributes(element: &NodeRef, tree: &FreeformNode) {
        let mut element = element.borrow_mut();
        if let Some(element) = element.element_mut() {
            for (name, value) in &tree.attributes {
                if !is_xmlns_attr(name) {
                    element.set_attribute(name, value);
                }
            }
        }
    }

    /// Builds the element for a new entry, resolving its namespace.
    ///
    /// A prefix is looked up in the `xmlns:` attributes of the entry, then of
    /// its enclosing entries from the innermost out, then in the bindings in
    /// scope at `parent`. An unprefixed name takes the entry's own `xmlns`,
    /// then the default namespace in scope, then the parent's namespace.
    fn freeform_element(
        parent: &NodeRef,
        entry: &FreeformNode,
        lineage: &[&FreeformNode],
    ) -> Result<XmlElement> {
        let (prefix, local) = split_qname(&entry.name);
        let uri = match prefix {
            Some(prefix) => {
                let decl = format!("{}:{}", XMLNS, prefix);
                entry
                    .attribute(&decl)
                    .or_else(|| lineage.iter().rev().find_map(|node| node.attribute(&decl)))
                    .map(str::to_string)
                    .or_else(|| NodeInner::lookup_namespace(parent, prefix))
                    .ok_or_else(|| {
                        Error::structure(format!(
                            "unbound namespace prefix `{}` in `{}`",
                            prefix, entry.name
                        ))
                    })?
            }
            None => entry
                .attribute(XMLNS)
                .map(str::to_string)
                .or_else(|| NodeInner::lookup_namespace(parent, ""))
                .unwrap_or_else(|| NodeInner::namespace_of(parent)),
        };

        let mut element = XmlElement::new_with_namespace(prefix, ExpandedName::new(uri, local));
        for (name, value) in &entry.attributes {
            if !is_xmlns_attr(name) {
                element.set_attribute(name, value);
            }
        }
        Ok(element)
    }
}
