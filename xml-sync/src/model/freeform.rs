//! Schema-free element trees, such as plugin `<configuration>` blocks.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{Error, Result};
use crate::node::{NodeRef, XmlContent};

/// A name/value tree with attributes.
///
/// A node carries either children or a value; when it has children its
/// value is ignored on write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeformNode {
    /// Element name, optionally `prefix:local`.
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FreeformNode>,
}

impl FreeformNode {
    pub fn new(name: impl Into<String>) -> Self {
        FreeformNode {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: FreeformNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns the first child with the given name.
    pub fn child(&self, name: &str) -> Option<&FreeformNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// True when there is anything to write for this node.
    pub fn has_content(&self) -> bool {
        !self.children.is_empty() || self.value.is_some()
    }

    /// Reads an element subtree. Leaf text is trimmed; whitespace-only leaf
    /// text counts as no value.
    pub fn from_element(node: &NodeRef) -> Option<FreeformNode> {
        let borrowed = node.borrow();
        let element = borrowed.element()?;

        let mut tree = FreeformNode::new(element.qname());
        for attr in element.attributes() {
            tree.attributes.insert(attr.name.clone(), attr.value.clone());
        }
        let mut has_elements = false;
        for child in borrowed.children() {
            if let Some(child_tree) = FreeformNode::from_element(child) {
                has_elements = true;
                tree.children.push(child_tree);
            }
        }
        if !has_elements {
            let text: String = borrowed
                .children()
                .iter()
                .filter_map(|c| {
                    c.borrow()
                        .content()
                        .and_then(XmlContent::as_text)
                        .map(|t| t.text().to_string())
                })
                .collect();
            let text = text.trim();
            if !text.is_empty() {
                tree.value = Some(text.to_string());
            }
        }
        Some(tree)
    }

    /// Parses an XML fragment with a single root element.
    pub fn parse_str(xml: &str) -> Result<FreeformNode> {
        let document = Document::parse_str(xml)?;
        let root = document.root_element()?;
        FreeformNode::from_element(&root)
            .ok_or_else(|| Error::structure("root is not an element"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_str() {
        let tree = FreeformNode::parse_str(
            "<configuration combine=\"merge\">\n  <source> 17 </source>\n  <args><arg>-g</arg><arg/></args>\n</configuration>",
        )
        .unwrap();

        assert_eq!(tree.name, "configuration");
        assert_eq!(tree.attribute("combine"), Some("merge"));
        assert_eq!(tree.value, None);
        assert_eq!(tree.child("source").unwrap().value.as_deref(), Some("17"));

        let args = tree.child("args").unwrap();
        assert_eq!(args.children.len(), 2);
        assert!(!args.children[1].has_content());
    }

    #[test]
    fn test_serde_shape() {
        let tree: FreeformNode = serde_json::from_str(
            r#"{"name":"configuration","children":[{"name":"a","value":"1","attributes":{"k":"v"}}]}"#,
        )
        .unwrap();
        assert_eq!(
            tree,
            FreeformNode::new("configuration")
                .with_child(FreeformNode::new("a").with_value("1").with_attribute("k", "v"))
        );
        assert_eq!(
            serde_json::to_string(&FreeformNode::new("x").with_value("1")).unwrap(),
            r#"{"name":"x","value":"1"}"#
        );
    }
}
