use indexmap::IndexMap;
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};

/// One instance of a schema's field set: a list item, or a map's sole entry.
pub type Record = IndexMap<String, Value>;

/// Generic node of the value tree. Image scalars are stored as a `Record`
/// with `data` and `filename` keys so the persisted encoding round-trips
/// without a schema in hand.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Text(String),
    Number(f64),
    Bool(bool),
    Record(Record),
    Collection(Vec<Value>),
}

impl Value {
    pub fn image(data: impl Into<String>, filename: impl Into<String>) -> Self {
        let mut record = Record::new();
        record.insert("data".to_string(), Value::Text(data.into()));
        record.insert("filename".to_string(), Value::Text(filename.into()));
        Value::Record(record)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&[Value]> {
        match self {
            Value::Collection(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<(&str, &str)> {
        let record = self.as_record()?;
        let data = record.get("data").and_then(Value::as_text).unwrap_or("");
        let filename = record
            .get("filename")
            .and_then(Value::as_text)
            .unwrap_or("");
        Some((data, filename))
    }

    /// Text for seeding an edit control; numbers drop a trailing `.0`.
    pub fn display_text(&self) -> String {
        match self {
            Value::None => String::new(),
            Value::Text(text) => text.clone(),
            Value::Number(number) => {
                if number.fract() == 0.0 && number.is_finite() {
                    format!("{}", *number as i64)
                } else {
                    format!("{number}")
                }
            }
            Value::Bool(flag) => flag.to_string(),
            Value::Record(_) | Value::Collection(_) => String::new(),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::None => JsonValue::Null,
            Value::Text(text) => JsonValue::String(text.clone()),
            Value::Number(number) => {
                if number.fract() == 0.0 && number.is_finite() && number.abs() < i64::MAX as f64 {
                    JsonValue::Number(JsonNumber::from(*number as i64))
                } else {
                    JsonNumber::from_f64(*number)
                        .map(JsonValue::Number)
                        .unwrap_or(JsonValue::Null)
                }
            }
            Value::Bool(flag) => JsonValue::Bool(*flag),
            Value::Record(record) => {
                let mut map = JsonMap::new();
                for (key, value) in record {
                    map.insert(key.clone(), value.to_json());
                }
                JsonValue::Object(map)
            }
            Value::Collection(items) => {
                JsonValue::Array(items.iter().map(Value::to_json).collect())
            }
        }
    }

    pub fn from_json(json: &JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::None,
            JsonValue::String(text) => Value::Text(text.clone()),
            JsonValue::Number(number) => number
                .as_f64()
                .map(Value::Number)
                .unwrap_or(Value::None),
            JsonValue::Bool(flag) => Value::Bool(*flag),
            JsonValue::Object(map) => {
                let mut record = Record::new();
                for (key, value) in map {
                    record.insert(key.clone(), Value::from_json(value));
                }
                Value::Record(record)
            }
            JsonValue::Array(items) => {
                Value::Collection(items.iter().map(Value::from_json).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Value;

    #[test]
    fn json_round_trip_preserves_structure() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"x": 5, "items": [{"b": "v"}], "on": true}"#).unwrap();
        let value = Value::from_json(&json);
        assert_eq!(value.to_json(), json);
    }

    #[test]
    fn image_helpers() {
        let image = Value::image("AAAB", "logo.png");
        assert_eq!(image.as_image(), Some(("AAAB", "logo.png")));
    }

    #[test]
    fn display_text_drops_integral_fraction() {
        assert_eq!(Value::Number(5.0).display_text(), "5");
        assert_eq!(Value::Number(5.25).display_text(), "5.25");
        assert_eq!(Value::None.display_text(), "");
    }
}
