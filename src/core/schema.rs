use std::fmt;

use serde::{Deserialize, Serialize};

/// How many field records a collection level shows: many for `List` and
/// `SimpleList`, exactly one for `Map`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    List,
    SimpleList,
    Map,
}

impl SchemaKind {
    pub fn is_map(self) -> bool {
        matches!(self, SchemaKind::Map)
    }
}

/// Field value type. Nested collections carry their child schema in the
/// variant payload, so a `List`/`Map` field without one cannot be expressed.
/// `SimpleList` fields have no declared child schema; the subtable schema is
/// synthesized from the field itself (see [`FieldSpec::subtable_schema`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Text,
    Number,
    Date,
    Bool,
    Image,
    List(Box<Schema>),
    SimpleList,
    Map(Box<Schema>),
}

impl ValueType {
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            ValueType::List(_) | ValueType::SimpleList | ValueType::Map(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldAttrs {
    pub multi_line: bool,
    /// Key of an externally supplied option list; the field renders as a
    /// select instead of free text.
    pub select_from: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub value_type: ValueType,
    #[serde(default)]
    pub attrs: FieldAttrs,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            label: None,
            value_type,
            attrs: FieldAttrs::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn multi_line(mut self) -> Self {
        self.attrs.multi_line = true;
        self
    }

    pub fn select_from(mut self, source: impl Into<String>) -> Self {
        self.attrs.select_from = Some(source.into());
        self
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(self.name.as_str())
    }

    /// The schema a subtable for this field renders, or `None` for scalar
    /// fields. A `SimpleList` field gets a synthesized one-column schema
    /// named after the field.
    pub fn subtable_schema(&self) -> Option<Schema> {
        match &self.value_type {
            ValueType::List(schema) => Some((**schema).clone()),
            ValueType::Map(schema) => Some((**schema).clone()),
            ValueType::SimpleList => Some(Schema {
                kind: SchemaKind::SimpleList,
                fields: vec![FieldSpec::new(self.name.clone(), ValueType::Text)],
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub kind: SchemaKind,
    pub fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(kind: SchemaKind, fields: Vec<FieldSpec>) -> Self {
        Self { kind, fields }
    }

    pub fn list(fields: Vec<FieldSpec>) -> Self {
        Self::new(SchemaKind::List, fields)
    }

    pub fn map(fields: Vec<FieldSpec>) -> Self {
        Self::new(SchemaKind::Map, fields)
    }

    pub fn from_json(input: &str) -> Result<Self, SchemaParseError> {
        serde_json::from_str(input).map_err(|err| SchemaParseError::new(err.to_string()))
    }

    pub fn from_yaml(input: &str) -> Result<Self, SchemaParseError> {
        serde_yaml::from_str(input).map_err(|err| SchemaParseError::new(err.to_string()))
    }

    pub fn field(&self, index: usize) -> Option<&FieldSpec> {
        self.fields.get(index)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaParseError {
    message: String,
}

impl SchemaParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_str())
    }
}

impl std::error::Error for SchemaParseError {}

#[cfg(test)]
mod tests {
    use super::{FieldSpec, Schema, SchemaKind, ValueType};

    #[test]
    fn simple_list_field_synthesizes_one_column_schema() {
        let field = FieldSpec::new("tags", ValueType::SimpleList);
        let schema = field.subtable_schema().expect("subtable schema");
        assert_eq!(schema.kind, SchemaKind::SimpleList);
        assert_eq!(schema.fields.len(), 1);
        assert_eq!(schema.fields[0].name, "tags");
        assert_eq!(schema.fields[0].value_type, ValueType::Text);
    }

    #[test]
    fn scalar_field_has_no_subtable_schema() {
        let field = FieldSpec::new("x", ValueType::Number);
        assert!(field.subtable_schema().is_none());
    }

    #[test]
    fn parses_nested_schema_from_yaml() {
        let schema = Schema::from_yaml(
            r#"
kind: map
fields:
  - name: a
    value_type:
      list:
        kind: list
        fields:
          - name: b
            value_type: text
"#,
        )
        .expect("yaml schema");

        assert_eq!(schema.kind, SchemaKind::Map);
        let nested = schema.fields[0].subtable_schema().expect("nested");
        assert_eq!(nested.kind, SchemaKind::List);
        assert_eq!(nested.fields[0].name, "b");
    }

    #[test]
    fn builder_attrs() {
        let field = FieldSpec::new("style", ValueType::Text)
            .with_label("Style")
            .select_from("styles");
        assert_eq!(field.display_label(), "Style");
        assert_eq!(field.attrs.select_from.as_deref(), Some("styles"));
    }
}
