//! Evaluation of schemas against models.

use tracing::{debug, warn};

use super::{FieldKind, Schema};
use crate::document::Document;
use crate::error::Result;
use crate::model::Model;
use crate::node::{NodeRef, XmlContent};
use crate::sync::{IndentationCounter, Synchronizer};

/// Synchronizes the fields of `schema` into `element`.
///
/// `counter` is the counter of the level `element` sits at; the fields are
/// processed one level deeper, in schema order.
pub fn walk(
    sync: &Synchronizer,
    schema: &Schema,
    model: &dyn Model,
    counter: &IndentationCounter,
    element: &NodeRef,
) -> Result<()> {
    let mut inner = counter.nested();
    for field in schema.fields {
        match field.kind {
            FieldKind::Scalar => {
                let value = model.scalar(field.name)?;
                sync.set_scalar(&mut inner, element, field.name, value.as_deref(), field.default)?;
            }
            FieldKind::ScalarList { wrapper, item } => {
                let values = model.scalar_list(field.name)?;
                sync.align_scalar_list(&mut inner, element, &values, wrapper, item)?;
            }
            FieldKind::Composite(child_schema) => {
                let value = model.composite(field.name)?;
                let child = sync.update_element(&mut inner, element, field.name, value.is_some())?;
                if let (Some(child), Some(value)) = (child, value) {
                    walk(sync, child_schema, value, &inner, &child)?;
                }
            }
            FieldKind::CompositeList {
                wrapper,
                item,
                schema: item_schema,
            } => {
                let values = model.composite_list(field.name)?;
                sync.align_list(&mut inner, element, &values, wrapper, item, |sync, value, node, counter| {
                    walk(sync, item_schema, *value, counter, node)
                })?;
            }
            FieldKind::Items {
                item,
                schema: item_schema,
            } => {
                let values = model.composite_list(field.name)?;
                sync.align_items(&mut inner, element, &values, item, |sync, value, node, counter| {
                    walk(sync, item_schema, *value, counter, node)
                })?;
            }
            FieldKind::Properties => {
                let properties = model.map(field.name)?.unwrap_or_default();
                sync.merge_properties(&mut inner, element, field.name, &properties)?;
            }
            FieldKind::Freeform => {
                let tree = model.freeform(field.name)?;
                sync.merge_freeform(&mut inner, element, field.name, tree)?;
            }
        }
    }
    Ok(())
}

/// Synchronizes `model` into the root element of `document`.
pub fn sync_document(
    sync: &Synchronizer,
    schema: &Schema,
    model: &dyn Model,
    document: &Document,
) -> Result<()> {
    let root = document.root_element()?;
    let name = root
        .borrow()
        .content()
        .and_then(XmlContent::as_element)
        .map(|e| e.local_name().to_string())
        .unwrap_or_default();
    if name != schema.root {
        warn!(expected = schema.root, found = %name, "root element does not match schema");
    }
    debug!(schema = schema.name, "synchronizing document");
    walk(sync, schema, model, &IndentationCounter::new(0), &root)
}
