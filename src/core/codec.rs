use crate::core::schema::{FieldSpec, Schema, SchemaKind, ValueType};
use crate::core::value::{Record, Value};

/// Coerces a raw input value to the shape the schema expects. Wrong-shape or
/// absent input falls back to the type default so malformed legacy data stays
/// editable; per-field defaulting happens lazily at render time.
pub fn normalize(schema: &Schema, raw: Value) -> Value {
    match schema.kind {
        SchemaKind::Map => match raw {
            Value::Record(record) => Value::Record(record),
            _ => Value::Record(Record::new()),
        },
        SchemaKind::List | SchemaKind::SimpleList => match raw {
            Value::Collection(items) => Value::Collection(items),
            _ => Value::Collection(Vec::new()),
        },
    }
}

/// Type-appropriate "no value" for a field, used when a record does not
/// carry the field at all.
pub fn type_default(field: &FieldSpec) -> Value {
    match &field.value_type {
        ValueType::Text | ValueType::Date => Value::Text(String::new()),
        ValueType::Number => Value::None,
        ValueType::Bool => Value::Bool(false),
        ValueType::Image => Value::image("", ""),
        ValueType::List(_) | ValueType::SimpleList => Value::Collection(Vec::new()),
        ValueType::Map(_) => Value::Record(Record::new()),
    }
}

/// One record with every field at its type default. Used for the synthetic
/// row of an empty list and for "add row".
pub fn empty_record(schema: &Schema) -> Record {
    let mut record = Record::new();
    for field in &schema.fields {
        record.insert(field.name.clone(), type_default(field));
    }
    record
}

/// Parses the stored textual encoding. Malformed input is treated as absent,
/// never fatal.
pub fn parse_stored(text: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(json) => Value::from_json(&json),
        Err(_) => Value::None,
    }
}

/// Re-encodes a value tree to the stored textual format.
pub fn encode(value: &Value) -> String {
    value.to_json().to_string()
}
