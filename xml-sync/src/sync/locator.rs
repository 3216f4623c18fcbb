//! Placement of new elements among existing siblings.

use tracing::trace;

use super::{IndentationCounter, Synchronizer};
use crate::error::Result;
use crate::node::{new_node, new_text_node, NodeInner, NodeRef};

impl Synchronizer {
    /// Inserts `child` into `parent` right after the element children the
    /// counter has already processed, preceded by padding that matches its
    /// siblings.
    ///
    /// The padding is a copy of the last whitespace-only text seen before the
    /// insertion point. Failing that, the padding in front of the next element
    /// child is copied, and only without either is `line_separator + indent *
    /// depth` synthesized. A parent with no content at all also gets closing
    /// padding one level shallower, so its end tag lands on its own line.
    pub fn insert_at_preferred_location(
        &self,
        parent: &NodeRef,
        child: NodeRef,
        counter: &IndentationCounter,
    ) -> Result<()> {
        let (index, leading, parent_empty) = {
            let parent_borrowed = parent.borrow();
            let children = parent_borrowed.children();
            let mut index = 0;
            let mut elements = 0;
            let mut last_text: Option<&NodeRef> = None;

            for (pos, node) in children.iter().enumerate() {
                if elements >= counter.current_index() {
                    break;
                }
                let node_borrowed = node.borrow();
                if node_borrowed.is_element() {
                    elements += 1;
                    index = pos + 1;
                } else if node_borrowed.content().is_some_and(|c| c.is_text())
                    && pos + 1 < children.len()
                {
                    // trailing text is the parent's closing padding
                    last_text = Some(node);
                }
            }

            let leading = last_text
                .filter(|text| text.borrow().is_padding())
                .or_else(|| Self::padding_before_next_element(&children[index..]))
                .and_then(|text| text.borrow().content().cloned());
            (index, leading, children.is_empty())
        };

        let leading = match leading {
            Some(content) => new_node(Some(content)),
            None => new_text_node(&self.padding(counter.depth())),
        };

        trace!(index, depth = counter.depth(), "inserting element");
        if parent_empty {
            let closing = self.padding(counter.depth().saturating_sub(1));
            NodeInner::add_child_at_to_ref(parent, index, new_text_node(&closing))?;
        }
        NodeInner::add_child_at_to_ref(parent, index, child)?;
        NodeInner::add_child_at_to_ref(parent, index, leading)?;
        Ok(())
    }

    /// The whitespace-only text directly in front of the first element in
    /// `following`, if there is one.
    fn padding_before_next_element(following: &[NodeRef]) -> Option<&NodeRef> {
        let mut previous: Option<&NodeRef> = None;
        for node in following {
            let node_borrowed = node.borrow();
            if node_borrowed.is_element() {
                return previous.filter(|text| text.borrow().is_padding());
            }
            previous = Some(node);
        }
        None
    }

    /// Line separator followed by `depth` indentation units.
    pub(crate) fn padding(&self, depth: usize) -> String {
        let mut padding = self.options().line_separator().to_string();
        padding.push_str(&self.options().indent().repeat(depth));
        padding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{new_element_node, XmlElement};
    use crate::sync::SyncOptions;
    use crate::xml::{parse_str, OutputFormat};

    fn insert(xml: &str, depth: usize, processed: usize) -> String {
        let doc = parse_str(xml).unwrap();
        let root = doc.root_element().unwrap();
        let mut counter = IndentationCounter::new(depth);
        for _ in 0..processed {
            counter.increase_count();
        }
        Synchronizer::default()
            .insert_at_preferred_location(&root, new_element_node(XmlElement::new("n")), &counter)
            .unwrap();
        doc.to_xml(&OutputFormat::default()).unwrap()
    }

    #[test]
    fn test_insert_into_empty_parent() {
        assert_eq!(insert("<r></r>", 1, 0), "<r>\n  <n></n>\n</r>");
    }

    #[test]
    fn test_insert_after_processed_elements() {
        let xml = "<r>\n    <a/>\n    <b/>\n</r>";
        assert_eq!(insert(xml, 1, 1), "<r>\n    <a/>\n    <n></n>\n    <b/>\n</r>");
        assert_eq!(insert(xml, 1, 2), "<r>\n    <a/>\n    <b/>\n    <n></n>\n</r>");
    }

    #[test]
    fn test_insert_first_copies_next_sibling_padding() {
        let xml = "<r>\n    <a/>\n</r>";
        assert_eq!(insert(xml, 1, 0), "<r>\n    <n></n>\n    <a/>\n</r>");

        let commented = "<r>\n\t<!-- c -->\n\t<a/>\n</r>";
        assert_eq!(
            insert(commented, 1, 0),
            "<r>\n\t<n></n>\n\t<!-- c -->\n\t<a/>\n</r>"
        );
    }

    #[test]
    fn test_insert_synthesizes_without_sibling_padding() {
        assert_eq!(insert("<r><a/></r>", 1, 0), "<r>\n  <n></n><a/></r>");
        assert_eq!(insert("<r>\n    <!-- c -->\n</r>", 1, 0), "<r>\n  <n></n>\n    <!-- c -->\n</r>");
    }

    #[test]
    fn test_custom_padding() {
        let sync = Synchronizer::new(SyncOptions::new("\t", "\r\n"));
        assert_eq!(sync.padding(2), "\r\n\t\t");
        assert_eq!(sync.padding(0), "\r\n");
    }
}
