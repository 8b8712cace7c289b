use crate::core::schema::{FieldSpec, Schema, SchemaKind, ValueType};
use crate::core::value::{Record, Value};

/// True iff the field holds its type-appropriate "no value" state.
pub fn is_empty_value(field: &FieldSpec, value: Option<&Value>) -> bool {
    let Some(value) = value else {
        return true;
    };
    match &field.value_type {
        ValueType::Text | ValueType::Date => match value {
            Value::None => true,
            Value::Text(text) => text.is_empty(),
            _ => false,
        },
        ValueType::Number => match value {
            Value::None => true,
            Value::Text(text) => text.is_empty(),
            Value::Number(_) => false,
            _ => true,
        },
        ValueType::Bool => !matches!(value, Value::Bool(true)),
        ValueType::Image => value
            .as_image()
            .map(|(_, filename)| filename.is_empty())
            .unwrap_or(true),
        ValueType::List(_) | ValueType::SimpleList => value
            .as_collection()
            .map(|items| items.is_empty())
            .unwrap_or(true),
        ValueType::Map(_) => value
            .as_record()
            .map(|record| record.is_empty())
            .unwrap_or(true),
    }
}

/// True iff every schema field of the record is empty.
pub fn is_empty_record(schema: &Schema, record: &Record) -> bool {
    schema
        .fields
        .iter()
        .all(|field| is_empty_value(field, record.get(field.name.as_str())))
}

/// The "before" side of the commit policy: emptiness of the original,
/// already-normalized input. Scalar input is never considered empty here.
pub fn is_empty_input(value: &Value) -> bool {
    match value {
        Value::Record(record) => record.is_empty(),
        Value::Collection(items) => items.is_empty(),
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommitDecision {
    Commit(Value),
    Discard,
}

/// Applied once, when the editor as a whole closes. Prevents the synthetic
/// row created for an originally-empty value from being written back as a
/// spurious single empty entry.
pub fn decide(schema: &Schema, before_empty: bool, after: Value) -> CommitDecision {
    if !before_empty {
        return CommitDecision::Commit(after);
    }

    match schema.kind {
        SchemaKind::Map => {
            let keep = after
                .as_record()
                .map(|record| !is_empty_record(schema, record))
                .unwrap_or(false);
            if keep {
                CommitDecision::Commit(after)
            } else {
                CommitDecision::Discard
            }
        }
        SchemaKind::List | SchemaKind::SimpleList => {
            let keep = match after.as_collection() {
                Some([]) | None => false,
                Some([only]) => only
                    .as_record()
                    .map(|record| !is_empty_record(schema, record))
                    .unwrap_or(true),
                Some(_) => true,
            };
            if keep {
                CommitDecision::Commit(after)
            } else {
                CommitDecision::Discard
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CommitDecision, decide, is_empty_record, is_empty_value};
    use crate::core::schema::{FieldSpec, Schema, ValueType};
    use crate::core::value::{Record, Value};

    fn record(entries: &[(&str, Value)]) -> Record {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn per_type_emptiness() {
        let text = FieldSpec::new("t", ValueType::Text);
        assert!(is_empty_value(&text, None));
        assert!(is_empty_value(&text, Some(&Value::Text(String::new()))));
        assert!(!is_empty_value(&text, Some(&Value::Text("v".into()))));

        let flag = FieldSpec::new("b", ValueType::Bool);
        assert!(is_empty_value(&flag, Some(&Value::Bool(false))));
        assert!(!is_empty_value(&flag, Some(&Value::Bool(true))));

        let image = FieldSpec::new("i", ValueType::Image);
        assert!(is_empty_value(&image, Some(&Value::image("data", ""))));
        assert!(!is_empty_value(&image, Some(&Value::image("", "a.png"))));

        let number = FieldSpec::new("n", ValueType::Number);
        assert!(is_empty_value(&number, Some(&Value::None)));
        assert!(!is_empty_value(&number, Some(&Value::Number(0.0))));
    }

    #[test]
    fn record_emptiness_is_schema_driven() {
        let schema = Schema::list(vec![
            FieldSpec::new("x", ValueType::Text),
            FieldSpec::new("items", ValueType::SimpleList),
        ]);
        assert!(is_empty_record(&schema, &record(&[])));
        assert!(is_empty_record(
            &schema,
            &record(&[
                ("x", Value::Text(String::new())),
                ("items", Value::Collection(Vec::new())),
                // keys outside the schema do not count
                ("stale", Value::Text("v".into())),
            ])
        ));
        assert!(!is_empty_record(
            &schema,
            &record(&[("items", Value::Collection(vec![Value::Record(Record::new())]))])
        ));
    }

    #[test]
    fn edited_input_always_commits() {
        let schema = Schema::list(vec![FieldSpec::new("x", ValueType::Text)]);
        let after = Value::Collection(Vec::new());
        assert_eq!(
            decide(&schema, false, after.clone()),
            CommitDecision::Commit(after)
        );
    }

    #[test]
    fn lone_empty_row_is_suppressed() {
        let schema = Schema::list(vec![FieldSpec::new("x", ValueType::Text)]);
        let blank = Value::Collection(vec![Value::Record(record(&[(
            "x",
            Value::Text(String::new()),
        )]))]);
        assert_eq!(decide(&schema, true, blank), CommitDecision::Discard);

        let filled = Value::Collection(vec![Value::Record(record(&[(
            "x",
            Value::Text("v".into()),
        )]))]);
        assert_eq!(
            decide(&schema, true, filled.clone()),
            CommitDecision::Commit(filled)
        );
    }

    #[test]
    fn two_rows_commit_even_if_both_empty() {
        let schema = Schema::list(vec![FieldSpec::new("x", ValueType::Text)]);
        let after = Value::Collection(vec![
            Value::Record(Record::new()),
            Value::Record(Record::new()),
        ]);
        assert_eq!(
            decide(&schema, true, after.clone()),
            CommitDecision::Commit(after)
        );
    }

    #[test]
    fn map_commits_only_when_something_was_entered() {
        let schema = Schema::map(vec![FieldSpec::new("a", ValueType::SimpleList)]);
        let empty = Value::Record(record(&[("a", Value::Collection(Vec::new()))]));
        assert_eq!(decide(&schema, true, empty), CommitDecision::Discard);

        let filled = Value::Record(record(&[(
            "a",
            Value::Collection(vec![Value::Record(Record::new())]),
        )]));
        assert_eq!(
            decide(&schema, true, filled.clone()),
            CommitDecision::Commit(filled)
        );
    }
}
