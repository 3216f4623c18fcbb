//! Schema-directed conversion of JSON documents into records.

use tracing::warn;

use super::{FreeformNode, Properties, Record, Value};
use crate::error::{Error, Result};
use crate::schema::{FieldKind, Schema};

impl Record {
    /// Builds a record from a JSON object, reading each key as the field of
    /// the same name in `schema`.
    ///
    /// Strings, numbers and booleans become scalars and `null` leaves the
    /// field absent. Keys the schema does not know are skipped with a
    /// warning.
    pub fn from_json(json: &serde_json::Value, schema: &Schema) -> Result<Record> {
        let object = json
            .as_object()
            .ok_or_else(|| Error::model(schema.name, "expected a JSON object"))?;

        let mut record = Record::new();
        for (key, value) in object {
            let Some(field) = schema.field(key) else {
                warn!(schema = schema.name, field = %key, "ignoring unknown field");
                continue;
            };
            if value.is_null() {
                continue;
            }

            let converted = match field.kind {
                FieldKind::Scalar => Value::Scalar(scalar(key, value)?),
                FieldKind::ScalarList { .. } => Value::List(
                    array(key, value)?
                        .iter()
                        .map(|item| scalar(key, item).map(Value::Scalar))
                        .collect::<Result<_>>()?,
                ),
                FieldKind::Composite(schema) => {
                    Value::Composite(Record::from_json(value, schema)?)
                }
                FieldKind::CompositeList { schema, .. } | FieldKind::Items { schema, .. } => {
                    Value::List(
                        array(key, value)?
                            .iter()
                            .map(|item| Record::from_json(item, schema).map(Value::Composite))
                            .collect::<Result<_>>()?,
                    )
                }
                FieldKind::Properties => Value::Map(properties(key, value)?),
                FieldKind::Freeform => {
                    let mut tree: FreeformNode = serde_json::from_value(value.clone())?;
                    if tree.name.is_empty() {
                        tree.name = field.name.to_string();
                    }
                    Value::Freeform(tree)
                }
            };
            record.set(field.name, converted);
        }
        Ok(record)
    }
}

fn scalar(field: &str, value: &serde_json::Value) -> Result<String> {
    match value {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        _ => Err(Error::model(field, "expected a string, number or boolean")),
    }
}

fn array<'a>(field: &str, value: &'a serde_json::Value) -> Result<&'a Vec<serde_json::Value>> {
    value
        .as_array()
        .ok_or_else(|| Error::model(field, "expected an array"))
}

fn properties(field: &str, value: &serde_json::Value) -> Result<Properties> {
    let object = value
        .as_object()
        .ok_or_else(|| Error::model(field, "expected an object"))?;
    object
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| Ok((k.clone(), scalar(k, v)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use crate::schema;
    use serde_json::json;

    #[test]
    fn test_from_json_project() {
        let json = json!({
            "artifactId": "demo",
            "version": 2,
            "modules": ["core", "cli"],
            "parent": {"groupId": "org.example", "relativePath": null},
            "properties": {"b": "2", "a": true},
            "dependencies": [{"artifactId": "x", "optional": false}],
            "nonsense": 1
        });
        let record = Record::from_json(&json, &schema::project::PROJECT).unwrap();

        assert_eq!(record.scalar("version").unwrap().as_deref(), Some("2"));
        assert_eq!(record.scalar_list("modules").unwrap(), vec!["core", "cli"]);
        assert!(record.get("nonsense").is_none());

        let parent = record.composite("parent").unwrap().unwrap();
        assert_eq!(parent.scalar("relativePath").unwrap(), None);

        let properties = record.map("properties").unwrap().unwrap();
        let keys: Vec<&str> = properties.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(properties["a"], "true");

        let dependencies = record.composite_list("dependencies").unwrap();
        assert_eq!(
            dependencies[0].scalar("optional").unwrap().as_deref(),
            Some("false")
        );
    }

    #[test]
    fn test_freeform_field() {
        let json = json!({
            "type": "jdk",
            "configuration": {"children": [{"name": "jdkHome", "value": "/opt/jdk"}]}
        });
        let record = Record::from_json(&json, &schema::toolchains::TOOLCHAIN).unwrap();
        let tree = record.freeform("configuration").unwrap().unwrap();
        assert_eq!(tree.name, "configuration");
        assert_eq!(tree.child("jdkHome").unwrap().value.as_deref(), Some("/opt/jdk"));
    }

    #[test]
    fn test_wrong_shape() {
        let json = json!({"modules": "core"});
        let result = Record::from_json(&json, &schema::project::PROJECT);
        assert!(matches!(result, Err(Error::Model { ref field, .. }) if field == "modules"));

        assert!(Record::from_json(&json!([1]), &schema::project::PROJECT).is_err());
    }
}
