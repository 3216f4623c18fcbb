//! Name-keyed string maps.

use tracing::debug;

use super::{IndentationCounter, Synchronizer};
use crate::error::Result;
use crate::model::Properties;
use crate::node::{NodeInner, NodeRef};

impl Synchronizer {
    /// Writes each entry of `properties` as a child of the `name` element,
    /// in map order, and drops children whose name is not a key.
    pub fn merge_properties(
        &self,
        counter: &mut IndentationCounter,
        parent: &NodeRef,
        name: &str,
        properties: &Properties,
    ) -> Result<Option<NodeRef>> {
        let element = self.update_element(counter, parent, name, !properties.is_empty())?;
        if let Some(element) = &element {
            let mut inner = counter.nested();
            for (key, value) in properties {
                self.set_scalar(&mut inner, element, key, Some(value.as_str()), None)?;
            }
            for child in NodeInner::element_children(element) {
                let stale = child
                    .borrow()
                    .element()
                    .is_some_and(|e| !properties.contains_key(e.local_name()));
                if stale {
                    debug!(container = name, "removing stale property");
                    NodeInner::detach_with_padding(&child)?;
                }
            }
        }
        Ok(element)
    }
}
