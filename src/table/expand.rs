use super::*;

impl TableView {
    /// Toggles the subtable of a nested-collection field beneath its row.
    ///
    /// At most one subtable may be expanded per row: expanding a second
    /// field first collapses (and flushes) the one currently shown.
    /// Expanding a collection whose schema defines no fields is refused with
    /// a notice and the placeholder stays collapsed.
    pub fn toggle_expand(&mut self, row_index: usize, field_index: usize) -> Vec<TableEvent> {
        let Some(row) = self.rows.get(row_index) else {
            return Vec::new();
        };
        if row
            .cells
            .get(field_index)
            .map(|cell| !cell.is_expander())
            .unwrap_or(true)
        {
            return Vec::new();
        }

        if let Some(child) = &row.expanded {
            let same_field = child.field_index == field_index;
            self.collapse_child(row_index);
            if same_field {
                return Vec::new();
            }
        }

        let field = &self.schema.fields[field_index];
        let child_schema = match field.subtable_schema() {
            Some(schema) if !schema.fields.is_empty() => schema,
            _ => {
                return vec![TableEvent::Notice(format!(
                    "No fields defined for '{}'",
                    field.display_label()
                ))];
            }
        };

        let row = &self.rows[row_index];
        let seed = self
            .registry
            .record(row.id)
            .and_then(|record| record.get(field.name.as_str()))
            .cloned()
            .unwrap_or_else(|| codec::type_default(field));

        let child_table = TableView::new_level(
            child_schema,
            seed,
            self.options.clone(),
            self.registry.minter().clone(),
        );
        let parent_id = row.id;
        let child_id = self.registry.register(RegistryEntry::Subtable {
            field_index,
            parent: parent_id,
        });

        let row = &mut self.rows[row_index];
        row.expanded = Some(ExpandedChild {
            id: child_id,
            field_index,
            table: Box::new(child_table),
        });
        if let Some(expander) = row.cells[field_index].as_expander_mut() {
            expander.set_expanded(true);
        }
        Vec::new()
    }

    /// Flushes the expanded subtable's current state into the owning record,
    /// refreshes the placeholder summary and removes the subtable.
    pub(super) fn collapse_child(&mut self, row_index: usize) {
        let Some(row) = self.rows.get_mut(row_index) else {
            return;
        };
        let Some(child) = row.expanded.take() else {
            return;
        };

        let flushed = child.table.collect();
        let field_name = self.schema.fields[child.field_index].name.clone();
        if let Some(expander) = row.cells[child.field_index].as_expander_mut() {
            expander.set_expanded(false);
            expander.seed(&flushed);
        }
        let row_id = row.id;
        if let Some(record) = self.registry.record_mut(row_id) {
            record.insert(field_name, flushed);
        }
        self.registry.remove(child.id);

        if self.focus == TableFocus::Child {
            self.focus = TableFocus::Body;
        }
    }
}
