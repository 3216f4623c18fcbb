//! Positional alignment of repeated child elements.

use tracing::debug;

use super::{IndentationCounter, Synchronizer};
use crate::error::Result;
use crate::node::{new_element_node, NodeInner, NodeRef};

impl Synchronizer {
    /// Aligns `values` with the `item` children of the `wrapper` child of
    /// `parent`.
    ///
    /// The wrapper exists exactly when `values` is non-empty. Existing items
    /// are paired with values in document order and handed to `update`;
    /// missing items are created, surplus items removed. Nothing is matched
    /// by identity, so a reordered list rewrites item contents pairwise.
    pub fn align_list<T, F>(
        &self,
        counter: &mut IndentationCounter,
        parent: &NodeRef,
        values: &[T],
        wrapper: &str,
        item: &str,
        update: F,
    ) -> Result<Option<NodeRef>>
    where
        F: FnMut(&Synchronizer, &T, &NodeRef, &IndentationCounter) -> Result<()>,
    {
        let element = self.update_element(counter, parent, wrapper, !values.is_empty())?;
        if let Some(element) = &element {
            let mut inner = counter.nested();
            self.align_items(&mut inner, element, values, item, update)?;
        }
        Ok(element)
    }

    /// Aligns `values` with the `item` children of `container` itself, for
    /// repeated elements that have no wrapper.
    ///
    /// `counter` is the container's own counter; each item advances it.
    pub fn align_items<T, F>(
        &self,
        counter: &mut IndentationCounter,
        container: &NodeRef,
        values: &[T],
        item: &str,
        mut update: F,
    ) -> Result<()>
    where
        F: FnMut(&Synchronizer, &T, &NodeRef, &IndentationCounter) -> Result<()>,
    {
        let namespace = NodeInner::namespace_of(container);
        let mut cursor = NodeInner::children_named(container, item, &namespace).into_iter();
        let existing = cursor.len();

        for value in values {
            let node = match cursor.next() {
                Some(node) => node,
                None => {
                    let node = new_element_node(Self::element_like(container, item, &namespace));
                    self.insert_at_preferred_location(container, node.clone(), counter)?;
                    node
                }
            };
            update(self, value, &node, counter)?;
            counter.increase_count();
        }

        let mut removed = 0;
        for leftover in cursor {
            NodeInner::detach_with_padding(&leftover)?;
            removed += 1;
        }
        if existing != values.len() {
            debug!(item, existing, wanted = values.len(), removed, "resized list");
        }
        Ok(())
    }

    /// Aligns a list of strings; each item holds one value as its text.
    pub fn align_scalar_list(
        &self,
        counter: &mut IndentationCounter,
        parent: &NodeRef,
        values: &[String],
        wrapper: &str,
        item: &str,
    ) -> Result<Option<NodeRef>> {
        self.align_list(counter, parent, values, wrapper, item, |_, value, node, _| {
            NodeInner::set_text_to_ref(node, value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{parse_str, OutputFormat};
    use pretty_assertions::assert_eq;

    fn align(xml: &str, values: &[&str]) -> String {
        let doc = parse_str(xml).unwrap();
        let root = doc.root_element().unwrap();
        let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        let mut counter = IndentationCounter::new(1);
        Synchronizer::default()
            .align_scalar_list(&mut counter, &root, &values, "modules", "module")
            .unwrap();
        doc.to_xml(&OutputFormat::default()).unwrap()
    }

    #[test]
    fn test_grow_list() {
        let xml = "<p>\n  <modules>\n    <module>1</module>\n  </modules>\n</p>";
        assert_eq!(
            align(xml, &["1", "3", "5"]),
            "<p>\n  <modules>\n    <module>1</module>\n    <module>3</module>\n    <module>5</module>\n  </modules>\n</p>"
        );
    }

    #[test]
    fn test_shrink_list_keeps_first_item_and_comments() {
        let xml = "<p>\n  <modules>\n    <!-- core -->\n    <module>1</module>\n    <module>3</module>\n    <module>5</module>\n  </modules>\n</p>";
        assert_eq!(
            align(xml, &["1"]),
            "<p>\n  <modules>\n    <!-- core -->\n    <module>1</module>\n  </modules>\n</p>"
        );
    }

    #[test]
    fn test_empty_list_removes_wrapper() {
        let xml = "<p>\n  <name>x</name>\n  <modules>\n    <module>1</module>\n  </modules>\n</p>";
        assert_eq!(align(xml, &[]), "<p>\n  <name>x</name>\n</p>");
    }

    #[test]
    fn test_new_wrapper_in_empty_parent() {
        assert_eq!(
            align("<p></p>", &["a", "b"]),
            "<p>\n  <modules>\n    <module>a</module>\n    <module>b</module>\n  </modules>\n</p>"
        );
    }

    #[test]
    fn test_align_items_without_wrapper() {
        let doc = parse_str("<r>\n  <t>1</t>\n  <t>2</t>\n  <t>3</t>\n</r>").unwrap();
        let root = doc.root_element().unwrap();
        let mut counter = IndentationCounter::new(1);
        let values = vec!["9".to_string(), "2".to_string()];

        Synchronizer::default()
            .align_items(&mut counter, &root, &values, "t", |_, value, node, _| {
                NodeInner::set_text_to_ref(node, value)
            })
            .unwrap();

        assert_eq!(counter.current_index(), 2);
        assert_eq!(
            doc.to_xml(&OutputFormat::default()).unwrap(),
            "<r>\n  <t>9</t>\n  <t>2</t>\n</r>"
        );
    }
}
