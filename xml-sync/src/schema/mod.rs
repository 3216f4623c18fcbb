//! Declarative descriptions of document formats.
//!
//! A [`Schema`] lists the fields of one element kind in document order and
//! says which synchronization primitive handles each. The walker in
//! [`walk`] evaluates those fields against a [`Model`](crate::model::Model).
//! Built-in schemas for the common Maven descriptors are available through
//! [`builtin`].

pub mod metadata;
pub mod project;
pub mod settings;
pub mod toolchains;
mod walker;

pub use walker::{sync_document, walk};

/// How a field is written.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// A child element holding text.
    Scalar,
    /// A wrapper element with one text item per value.
    ScalarList {
        wrapper: &'static str,
        item: &'static str,
    },
    /// A child element described by another schema.
    Composite(&'static Schema),
    /// A wrapper element with one item element per composite.
    CompositeList {
        wrapper: &'static str,
        item: &'static str,
        schema: &'static Schema,
    },
    /// Item elements directly under the current element, without a wrapper.
    Items {
        item: &'static str,
        schema: &'static Schema,
    },
    /// A child element whose children are name/value pairs.
    Properties,
    /// A child element holding a schema-free tree.
    Freeform,
}

/// One field of a schema.
///
/// `name` is both the model key and, for all but [`FieldKind::Items`], the
/// name of the child element.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Value that is not written when the document does not already hold
    /// something else. Only used by scalars.
    pub default: Option<&'static str>,
}

impl Field {
    pub const fn scalar(name: &'static str) -> Field {
        Field {
            name,
            kind: FieldKind::Scalar,
            default: None,
        }
    }

    pub const fn scalar_with_default(name: &'static str, default: &'static str) -> Field {
        Field {
            name,
            kind: FieldKind::Scalar,
            default: Some(default),
        }
    }

    pub const fn scalar_list(name: &'static str, item: &'static str) -> Field {
        Field {
            name,
            kind: FieldKind::ScalarList {
                wrapper: name,
                item,
            },
            default: None,
        }
    }

    pub const fn composite(name: &'static str, schema: &'static Schema) -> Field {
        Field {
            name,
            kind: FieldKind::Composite(schema),
            default: None,
        }
    }

    pub const fn composite_list(
        name: &'static str,
        item: &'static str,
        schema: &'static Schema,
    ) -> Field {
        Field {
            name,
            kind: FieldKind::CompositeList {
                wrapper: name,
                item,
                schema,
            },
            default: None,
        }
    }

    pub const fn items(name: &'static str, item: &'static str, schema: &'static Schema) -> Field {
        Field {
            name,
            kind: FieldKind::Items { item, schema },
            default: None,
        }
    }

    pub const fn properties(name: &'static str) -> Field {
        Field {
            name,
            kind: FieldKind::Properties,
            default: None,
        }
    }

    pub const fn freeform(name: &'static str) -> Field {
        Field {
            name,
            kind: FieldKind::Freeform,
            default: None,
        }
    }
}

/// The ordered fields of one element kind.
#[derive(Debug)]
pub struct Schema {
    /// Schema name, used for lookup and in messages.
    pub name: &'static str,
    /// Expected element name.
    pub root: &'static str,
    pub fields: &'static [Field],
}

impl Schema {
    /// Finds a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Schemas for whole documents, by name.
pub static BUILTIN: &[&Schema] = &[
    &project::PROJECT,
    &settings::SETTINGS,
    &toolchains::TOOLCHAINS,
    &metadata::METADATA,
];

/// Looks up a built-in document schema.
pub fn builtin(name: &str) -> Option<&'static Schema> {
    BUILTIN.iter().copied().find(|s| s.name == name)
}
