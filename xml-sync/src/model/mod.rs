//! Logical values synchronized into documents.
//!
//! The schema walker reads values through the [`Model`] capability trait, so
//! any typed object graph can be written by implementing it. [`Record`] is
//! the generic implementation, holding tagged [`Value`]s by field name.

mod freeform;
mod json;

pub use freeform::FreeformNode;

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// An unordered key to string map, iterated in insertion order.
pub type Properties = IndexMap<String, String>;

/// One logical field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    List(Vec<Value>),
    Composite(Record),
    Map(Properties),
    Freeform(FreeformNode),
}

impl Value {
    /// Name of the variant, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::List(_) => "list",
            Value::Composite(_) => "composite",
            Value::Map(_) => "map",
            Value::Freeform(_) => "freeform tree",
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Composite(value)
    }
}

impl From<Properties> for Value {
    fn from(value: Properties) -> Self {
        Value::Map(value)
    }
}

impl From<FreeformNode> for Value {
    fn from(value: FreeformNode) -> Self {
        Value::Freeform(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

/// Read access to the fields of one object, by field name.
///
/// Every accessor defaults to "absent", so an implementation only needs the
/// accessors for the kinds of fields it has. A field holding a value of the
/// wrong shape is an [`Error::Model`].
pub trait Model {
    fn scalar(&self, _field: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn scalar_list(&self, _field: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn composite(&self, _field: &str) -> Result<Option<&dyn Model>> {
        Ok(None)
    }

    fn composite_list(&self, _field: &str) -> Result<Vec<&dyn Model>> {
        Ok(Vec::new())
    }

    fn map(&self, _field: &str) -> Result<Option<Properties>> {
        Ok(None)
    }

    fn freeform(&self, _field: &str) -> Result<Option<&FreeformNode>> {
        Ok(None)
    }
}

/// A generic object: field values by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Record::set`].
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.fields.get_mut(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.shift_remove(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn mismatch(field: &str, expected: &str, found: &Value) -> Error {
        Error::model(
            field,
            format!("expected {}, found {}", expected, found.kind_name()),
        )
    }
}

impl Model for Record {
    fn scalar(&self, field: &str) -> Result<Option<String>> {
        match self.fields.get(field) {
            None => Ok(None),
            Some(Value::Scalar(value)) => Ok(Some(value.clone())),
            Some(other) => Err(Self::mismatch(field, "a scalar", other)),
        }
    }

    fn scalar_list(&self, field: &str) -> Result<Vec<String>> {
        match self.fields.get(field) {
            None => Ok(Vec::new()),
            Some(Value::List(items)) => items
                .iter()
                .map(|item| match item {
                    Value::Scalar(value) => Ok(value.clone()),
                    other => Err(Self::mismatch(field, "a list of scalars", other)),
                })
                .collect(),
            Some(other) => Err(Self::mismatch(field, "a list", other)),
        }
    }

    fn composite(&self, field: &str) -> Result<Option<&dyn Model>> {
        match self.fields.get(field) {
            None => Ok(None),
            Some(Value::Composite(record)) => Ok(Some(record)),
            Some(other) => Err(Self::mismatch(field, "a composite", other)),
        }
    }

    fn composite_list(&self, field: &str) -> Result<Vec<&dyn Model>> {
        match self.fields.get(field) {
            None => Ok(Vec::new()),
            Some(Value::List(items)) => items
                .iter()
                .map(|item| match item {
                    Value::Composite(record) => Ok(record as &dyn Model),
                    other => Err(Self::mismatch(field, "a list of composites", other)),
                })
                .collect(),
            Some(other) => Err(Self::mismatch(field, "a list", other)),
        }
    }

    fn map(&self, field: &str) -> Result<Option<Properties>> {
        match self.fields.get(field) {
            None => Ok(None),
            Some(Value::Map(map)) => Ok(Some(map.clone())),
            Some(other) => Err(Self::mismatch(field, "a map", other)),
        }
    }

    fn freeform(&self, field: &str) -> Result<Option<&FreeformNode>> {
        match self.fields.get(field) {
            None => Ok(None),
            Some(Value::Freeform(tree)) => Ok(Some(tree)),
            Some(other) => Err(Self::mismatch(field, "a freeform tree", other)),
        }
    }
}
