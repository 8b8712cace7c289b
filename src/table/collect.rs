use super::*;

impl TableView {
    /// Reconstructs this level's value tree from current view state: the
    /// single record for a map, the ordered row records for a list. An
    /// expanded subtable is read live (without collapsing it); a collapsed
    /// nested field keeps the value last flushed into its record.
    pub fn collect(&self) -> Value {
        if self.is_map() {
            let record = self
                .rows
                .first()
                .map(|row| self.collect_row(row))
                .unwrap_or_default();
            return Value::Record(record);
        }

        Value::Collection(
            self.rows
                .iter()
                .map(|row| Value::Record(self.collect_row(row)))
                .collect(),
        )
    }

    fn collect_row(&self, row: &RowState) -> Record {
        let mut record = self.registry.record(row.id).cloned().unwrap_or_default();

        for (field_index, field) in self.schema.fields.iter().enumerate() {
            if field.value_type.is_collection() {
                // a subtable is a side channel into its parent's field; only
                // an expanded one overrides the stored value
                if let Some(child) = &row.expanded
                    && child.field_index == field_index
                {
                    record.insert(field.name.clone(), child.table.collect());
                }
                continue;
            }

            let value = row
                .cells
                .get(field_index)
                .and_then(Cell::as_widget)
                .map(|widget| widget.value())
                .unwrap_or(Value::None);
            record.insert(field.name.clone(), value);
        }

        record
    }
}
