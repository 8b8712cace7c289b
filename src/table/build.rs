use super::*;

impl TableView {
    /// Builds the view for one collection level. The raw value is normalized
    /// first; an empty list renders one synthetic empty record so the table
    /// never shows zero rows on open, and a map is treated as a one-element
    /// list internally.
    pub(super) fn new_level(
        schema: Schema,
        raw: Value,
        options: Arc<dyn OptionSource>,
        minter: IdMinter,
    ) -> Self {
        let normalized = codec::normalize(&schema, raw);
        let mut table = Self {
            schema,
            options,
            registry: RowRegistry::new(minter),
            rows: Vec::new(),
            focus: TableFocus::Body,
            active_row: 0,
            active_col: 0,
        };

        match normalized {
            Value::Record(record) => {
                table.push_row(record);
            }
            Value::Collection(items) => {
                if items.is_empty() {
                    let record = codec::empty_record(&table.schema);
                    table.push_row(record);
                } else {
                    for item in items {
                        let record = match item {
                            Value::Record(record) => record,
                            // non-record list items from legacy data seed the
                            // first field and stay editable
                            other => {
                                let mut record = codec::empty_record(&table.schema);
                                if let Some(field) = table.schema.fields.first() {
                                    record.insert(field.name.clone(), other);
                                }
                                record
                            }
                        };
                        table.push_row(record);
                    }
                }
            }
            _ => {}
        }

        table
    }

    pub(super) fn push_row(&mut self, record: Record) -> RowId {
        let cells = self
            .schema
            .fields
            .iter()
            .map(|field| {
                let seed = record
                    .get(field.name.as_str())
                    .cloned()
                    .unwrap_or_else(|| codec::type_default(field));
                Cell::for_field(field, Some(&seed), self.options.as_ref())
            })
            .collect();
        let id = self.registry.register(RegistryEntry::Row { record });
        self.rows.push(RowState {
            id,
            cells,
            expanded: None,
        });
        id
    }

    /// Appends a fresh empty record and focuses it. No-op for a map, whose
    /// single record cannot be added to.
    pub fn add_row(&mut self) -> Option<RowId> {
        if self.is_map() {
            return None;
        }
        let record = codec::empty_record(&self.schema);
        let id = self.push_row(record);
        self.focus = TableFocus::Body;
        self.active_row = self.rows.len() - 1;
        self.active_col = 0;
        Some(id)
    }

    /// Deletes a row and its registry entries (including an expanded
    /// subtable's). Other rows keep their identity. No-op for a map.
    pub fn delete_row(&mut self, index: usize) -> Option<RowId> {
        if self.is_map() || index >= self.rows.len() {
            return None;
        }
        let row = self.rows.remove(index);
        if let Some(child) = row.expanded {
            self.registry.remove(child.id);
        }
        self.registry.remove(row.id);

        if self.rows.is_empty() {
            self.focus = TableFocus::AddRow;
            self.active_row = 0;
        } else {
            self.active_row = self.active_row.min(self.rows.len() - 1);
        }
        Some(row.id)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::schema::{FieldSpec, Schema, ValueType};
    use crate::core::value::Value;
    use crate::table::TableView;

    fn schema() -> Schema {
        Schema::list(vec![FieldSpec::new("name", ValueType::Text)])
    }

    #[test]
    fn empty_list_opens_with_one_blank_row() {
        let table = TableView::new(schema(), Value::Collection(Vec::new()));
        assert_eq!(table.row_count(), 1);
        let record = table.row_record(0).unwrap();
        assert_eq!(record.get("name"), Some(&Value::Text(String::new())));
    }

    #[test]
    fn non_record_items_seed_the_first_field() {
        let raw = Value::Collection(vec![Value::Text("legacy".into())]);
        let table = TableView::new(schema(), raw);
        let record = table.row_record(0).unwrap();
        assert_eq!(record.get("name"), Some(&Value::Text("legacy".into())));
    }

    #[test]
    fn surviving_rows_keep_their_ids_after_delete() {
        let raw = Value::Collection(vec![
            Value::Record([("name".to_string(), Value::Text("a".into()))].into_iter().collect()),
            Value::Record([("name".to_string(), Value::Text("b".into()))].into_iter().collect()),
        ]);
        let mut table = TableView::new(schema(), raw);
        let second = table.row_id(1).unwrap();
        table.delete_row(0);
        assert_eq!(table.row_id(0), Some(second));
    }

    #[test]
    fn ids_are_never_reused() {
        let mut table = TableView::new(schema(), Value::Collection(Vec::new()));
        let first = table.delete_row(0).unwrap();
        let replacement = table.add_row().unwrap();
        assert_ne!(first, replacement);
    }

    #[test]
    fn map_rejects_add_and_delete() {
        let map = Schema::map(vec![FieldSpec::new("title", ValueType::Text)]);
        let mut table = TableView::new(map, Value::None);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.add_row(), None);
        assert_eq!(table.delete_row(0), None);
        assert_eq!(table.row_count(), 1);
    }
}
