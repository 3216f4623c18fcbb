//! Node structures for XML tree representation.
//!
//! A parsed document is a tree of `NodeInner` values behind `Rc<RefCell<_>>`.
//! The document node has no content; every other node holds one `XmlContent`.
//! All structural edits go through the associated functions on `NodeInner`,
//! which keep parent links and child positions consistent and reject edits
//! that would corrupt the tree.

mod namespace;
mod xml_content;

pub use namespace::{is_xmlns_attr, split_qname, ExpandedName, NamespaceContext};
pub use xml_content::{
    Attribute, XmlComment, XmlContent, XmlDocType, XmlElement, XmlProcessingInstruction, XmlText,
};

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::constants::XML_NAMESPACE;
use crate::error::{Error, Result};

/// Global counter for generating unique node IDs.
static NODE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generates a unique node ID.
fn next_node_id() -> u64 {
    NODE_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A reference-counted pointer to a node.
pub type NodeRef = Rc<RefCell<NodeInner>>;

/// Creates a new node reference.
pub fn new_node(content: Option<XmlContent>) -> NodeRef {
    Rc::new(RefCell::new(NodeInner::new(content)))
}

/// Creates a new element node.
pub fn new_element_node(element: XmlElement) -> NodeRef {
    new_node(Some(XmlContent::Element(element)))
}

/// Creates a new plain text node.
pub fn new_text_node(text: &str) -> NodeRef {
    new_node(Some(XmlContent::Text(XmlText::new(text))))
}

/// The inner data of a node in the parse tree.
#[derive(Debug)]
pub struct NodeInner {
    /// Unique identifier for this node.
    id: u64,
    /// Child nodes.
    children: Vec<NodeRef>,
    /// XML content of this node, `None` for the document node.
    content: Option<XmlContent>,
    /// Weak reference to parent node.
    parent: Weak<RefCell<NodeInner>>,
    /// Zero-based position among siblings (-1 when detached).
    child_pos: i32,
}

impl NodeInner {
    /// Creates a new detached node with the given content.
    pub fn new(content: Option<XmlContent>) -> Self {
        NodeInner {
            id: next_node_id(),
            children: Vec::new(),
            content,
            parent: Weak::new(),
            child_pos: -1,
        }
    }

    /// Returns the unique ID of this node.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the content of this node.
    pub fn content(&self) -> Option<&XmlContent> {
        self.content.as_ref()
    }

    /// Returns a mutable reference to the content.
    pub fn content_mut(&mut self) -> Option<&mut XmlContent> {
        self.content.as_mut()
    }

    /// Returns the element content, if this is an element node.
    pub fn element(&self) -> Option<&XmlElement> {
        self.content.as_ref().and_then(XmlContent::as_element)
    }

    /// Returns the element content mutably, if this is an element node.
    pub fn element_mut(&mut self) -> Option<&mut XmlElement> {
        self.content.as_mut().and_then(XmlContent::as_element_mut)
    }

    /// Returns true if this node is an element.
    pub fn is_element(&self) -> bool {
        self.element().is_some()
    }

    /// Returns true if this node is whitespace-only, non-CDATA text.
    pub fn is_padding(&self) -> bool {
        self.content.as_ref().is_some_and(XmlContent::is_padding)
    }

    /// Elements and the document node may hold children.
    pub fn is_container(&self) -> bool {
        matches!(self.content, None | Some(XmlContent::Element(_)))
    }

    /// Returns the number of children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Returns a reference to the child at the given index.
    pub fn child(&self, index: usize) -> Option<&NodeRef> {
        self.children.get(index)
    }

    /// Returns the children as a slice.
    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    /// Returns a weak reference to the parent.
    pub fn parent(&self) -> &Weak<RefCell<NodeInner>> {
        &self.parent
    }

    /// Returns the child position (0-based index among siblings, -1 when detached).
    pub fn child_pos(&self) -> i32 {
        self.child_pos
    }

    /// Returns true if this node has a left sibling.
    pub fn has_left_sibling(&self) -> bool {
        self.child_pos > 0
    }
}

/// Helper functions that work with NodeRef.
impl NodeInner {
    fn check_insert(parent_ref: &NodeRef, child_ref: &NodeRef) -> Result<()> {
        if Rc::ptr_eq(parent_ref, child_ref) {
            return Err(Error::structure("a node cannot be its own child"));
        }
        if !parent_ref.borrow().is_container() {
            return Err(Error::structure("only elements can hold children"));
        }
        if child_ref.borrow().parent.upgrade().is_some() {
            return Err(Error::structure("node is already attached to a parent"));
        }
        Ok(())
    }

    /// Appends a child node.
    pub fn add_child_to_ref(parent_ref: &NodeRef, child_ref: NodeRef) -> Result<()> {
        let len = parent_ref.borrow().children.len();
        Self::add_child_at_to_ref(parent_ref, len, child_ref)
    }

    /// Inserts a child at the given index.
    pub fn add_child_at_to_ref(parent_ref: &NodeRef, index: usize, child_ref: NodeRef) -> Result<()> {
        Self::check_insert(parent_ref, &child_ref)?;
        let len = parent_ref.borrow().children.len();
        if index > len {
            return Err(Error::structure(format!(
                "insert index {} out of range for {} children",
                index, len
            )));
        }
        {
            let mut child = child_ref.borrow_mut();
            child.parent = Rc::downgrade(parent_ref);
            child.child_pos = index as i32;
        }
        let mut parent = parent_ref.borrow_mut();
        parent.children.insert(index, child_ref);
        // Update child positions for siblings after the insertion point
        for i in (index + 1)..parent.children.len() {
            parent.children[i].borrow_mut().child_pos = i as i32;
        }
        Ok(())
    }

    /// Removes the child at the given index and returns it detached.
    pub fn remove_child_to_ref(parent_ref: &NodeRef, index: usize) -> Result<NodeRef> {
        let mut parent = parent_ref.borrow_mut();
        if index >= parent.children.len() {
            return Err(Error::structure(format!(
                "remove index {} out of range for {} children",
                index,
                parent.children.len()
            )));
        }
        let removed = parent.children.remove(index);
        {
            let mut child = removed.borrow_mut();
            child.parent = Weak::new();
            child.child_pos = -1;
        }
        // Update child positions for siblings after the removal point
        for i in index..parent.children.len() {
            parent.children[i].borrow_mut().child_pos = i as i32;
        }
        Ok(removed)
    }

    /// Removes all children.
    pub fn remove_children_to_ref(parent_ref: &NodeRef) {
        let children = std::mem::take(&mut parent_ref.borrow_mut().children);
        for child in children {
            let mut child = child.borrow_mut();
            child.parent = Weak::new();
            child.child_pos = -1;
        }
    }

    /// Detaches a node from its parent.
    pub fn detach(node_ref: &NodeRef) -> Result<()> {
        let (parent, pos) = {
            let node = node_ref.borrow();
            (node.parent.upgrade(), node.child_pos)
        };
        let parent = parent.ok_or_else(|| Error::structure("node is not attached"))?;
        Self::remove_child_to_ref(&parent, pos as usize)?;
        Ok(())
    }

    /// Detaches a node together with the padding text directly before it.
    pub fn detach_with_padding(node_ref: &NodeRef) -> Result<()> {
        if let Some(left) = Self::left_sibling_of_ref(node_ref) {
            if left.borrow().is_padding() {
                Self::detach(&left)?;
            }
        }
        Self::detach(node_ref)
    }

    /// Gets the left sibling of a node.
    pub fn left_sibling_of_ref(node_ref: &NodeRef) -> Option<NodeRef> {
        let node = node_ref.borrow();
        if node.child_pos <= 0 {
            return None;
        }
        let parent = node.parent.upgrade()?;
        let parent_borrowed = parent.borrow();
        parent_borrowed
            .children
            .get((node.child_pos - 1) as usize)
            .cloned()
    }

    /// Returns the element children of a node, in document order.
    pub fn element_children(node_ref: &NodeRef) -> Vec<NodeRef> {
        node_ref
            .borrow()
            .children
            .iter()
            .filter(|c| c.borrow().is_element())
            .cloned()
            .collect()
    }

    /// Returns the element children with the given local name and namespace.
    pub fn children_named(node_ref: &NodeRef, local_name: &str, namespace_uri: &str) -> Vec<NodeRef> {
        node_ref
            .borrow()
            .children
            .iter()
            .filter(|c| {
                c.borrow()
                    .element()
                    .is_some_and(|e| e.names_match(local_name, namespace_uri))
            })
            .cloned()
            .collect()
    }

    /// Returns the first element child with the given local name and namespace.
    pub fn find_child(node_ref: &NodeRef, local_name: &str, namespace_uri: &str) -> Option<NodeRef> {
        node_ref
            .borrow()
            .children
            .iter()
            .find(|c| {
                c.borrow()
                    .element()
                    .is_some_and(|e| e.names_match(local_name, namespace_uri))
            })
            .cloned()
    }

    /// Returns the namespace URI of an element node, empty otherwise.
    pub fn namespace_of(node_ref: &NodeRef) -> String {
        node_ref
            .borrow()
            .element()
            .map(|e| e.namespace_uri().to_string())
            .unwrap_or_default()
    }

    /// Looks up the URI bound to `prefix` (empty for the default namespace)
    /// on this element or its ancestors.
    pub fn lookup_namespace(node_ref: &NodeRef, prefix: &str) -> Option<String> {
        if prefix == "xml" {
            return Some(XML_NAMESPACE.to_string());
        }
        let mut current = Some(node_ref.clone());
        while let Some(node) = current {
            let borrowed = node.borrow();
            if let Some(element) = borrowed.element() {
                if let Some((_, uri)) = element.namespace_decls().find(|(p, _)| *p == prefix) {
                    return Some(uri.to_string());
                }
            }
            current = borrowed.parent.upgrade();
        }
        None
    }

    /// Concatenates the text and CDATA children of a node.
    pub fn text_of(node_ref: &NodeRef) -> String {
        node_ref
            .borrow()
            .children
            .iter()
            .filter_map(|c| c.borrow().content().and_then(XmlContent::as_text).map(|t| t.text().to_string()))
            .collect()
    }

    /// Replaces the content of an element with a single text node.
    ///
    /// Content that is only text and already reads `value` is left alone,
    /// keeping its escaping and CDATA sections.
    pub fn set_text_to_ref(node_ref: &NodeRef, value: &str) -> Result<()> {
        let only_text = node_ref
            .borrow()
            .children
            .iter()
            .all(|c| c.borrow().content().is_some_and(XmlContent::is_text));
        if only_text && Self::text_of(node_ref) == value {
            return Ok(());
        }
        Self::remove_children_to_ref(node_ref);
        if !value.is_empty() {
            Self::add_child_to_ref(node_ref, new_text_node(value))?;
        }
        Ok(())
    }
}
