use super::*;

#[derive(Debug, Default)]
pub struct Interaction {
    pub handled: bool,
    pub events: Vec<TableEvent>,
}

impl Interaction {
    pub fn handled() -> Self {
        Self {
            handled: true,
            events: Vec::new(),
        }
    }

    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<TableEvent>) -> Self {
        Self {
            handled: true,
            events,
        }
    }
}

impl TableView {
    /// Routes one key press. Every transition runs to completion before the
    /// next event is processed; the registry is never left half-updated.
    pub fn handle_key(&mut self, key: KeyEvent) -> Interaction {
        // shortcuts act on this level only; with an expanded subtable focused
        // they fall through to the child via the focus dispatch below
        if key.modifiers.contains(KeyModifiers::CONTROL) && self.focus != TableFocus::Child {
            match key.code {
                KeyCode::Char('n') if !self.is_map() => {
                    self.add_row();
                    return Interaction::handled();
                }
                KeyCode::Char('d') if !self.is_map() && self.focus == TableFocus::Body => {
                    self.delete_row(self.active_row);
                    return Interaction::handled();
                }
                _ => {}
            }
        }

        match self.focus {
            TableFocus::Body => self.on_key_body(key),
            TableFocus::AddRow => self.on_key_add_row(key),
            TableFocus::Child => self.on_key_child(key),
        }
    }

    /// Hands a host-loaded file payload to the focused image cell, following
    /// the focus chain into expanded subtables.
    pub fn apply_file(&mut self, payload: FilePayload) -> bool {
        if self.focus == TableFocus::Child {
            if let Some(child) = self.expanded_child_mut_at_active() {
                return child.apply_file(payload);
            }
            return false;
        }
        let Some(widget) = self.active_widget_mut() else {
            return false;
        };
        widget.apply_file(payload)
    }

    fn on_key_body(&mut self, key: KeyEvent) -> Interaction {
        match key.code {
            KeyCode::Up => {
                self.active_row = self.active_row.saturating_sub(1);
                return Interaction::handled();
            }
            KeyCode::Down => {
                if self.active_row + 1 >= self.rows.len() {
                    if !self.is_map() {
                        self.focus = TableFocus::AddRow;
                    }
                } else {
                    self.active_row += 1;
                }
                return Interaction::handled();
            }
            KeyCode::Tab => {
                self.move_col(1);
                return Interaction::handled();
            }
            KeyCode::BackTab => {
                self.move_col(-1);
                return Interaction::handled();
            }
            _ => {}
        }

        if self.active_cell_is_expander() {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let events = self.toggle_expand(self.active_row, self.active_col);
                    if self
                        .rows
                        .get(self.active_row)
                        .and_then(|row| row.expanded.as_ref())
                        .is_some()
                    {
                        self.focus = TableFocus::Child;
                    }
                    Interaction::with_events(events)
                }
                _ => Interaction::ignored(),
            };
        }

        let Some(widget) = self.active_widget_mut() else {
            return Interaction::ignored();
        };
        match widget.handle_key(key) {
            KeyResult::Handled => Interaction::handled(),
            KeyResult::Submit => {
                self.advance_cell();
                Interaction::handled()
            }
            KeyResult::RequestFile => Interaction::with_events(vec![TableEvent::FileRequested]),
            KeyResult::NotHandled => Interaction::ignored(),
        }
    }

    fn on_key_add_row(&mut self, key: KeyEvent) -> Interaction {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('+') => {
                self.add_row();
                Interaction::handled()
            }
            KeyCode::Up => {
                if !self.rows.is_empty() {
                    self.focus = TableFocus::Body;
                    self.active_row = self.rows.len() - 1;
                }
                Interaction::handled()
            }
            _ => Interaction::ignored(),
        }
    }

    fn on_key_child(&mut self, key: KeyEvent) -> Interaction {
        let Some(child) = self.expanded_child_mut_at_active() else {
            self.focus = TableFocus::Body;
            return Interaction::handled();
        };

        let result = child.handle_key(key);
        if result.handled {
            return result;
        }

        // Esc climbs back to the owning row without collapsing the subtable
        if key.code == KeyCode::Esc {
            self.focus = TableFocus::Body;
            return Interaction::handled();
        }
        Interaction::ignored()
    }

    fn expanded_child_mut_at_active(&mut self) -> Option<&mut TableView> {
        let index = self.active_row;
        self.expanded_child_mut(index)
    }

    fn active_cell_is_expander(&self) -> bool {
        self.rows
            .get(self.active_row)
            .and_then(|row| row.cells.get(self.active_col))
            .map(Cell::is_expander)
            .unwrap_or(false)
    }

    fn active_widget_mut(&mut self) -> Option<&mut Box<dyn CellWidget>> {
        self.rows
            .get_mut(self.active_row)?
            .cells
            .get_mut(self.active_col)?
            .as_widget_mut()
    }

    fn move_col(&mut self, direction: isize) {
        let len = self.schema.fields.len() as isize;
        if len == 0 {
            return;
        }
        let next = (self.active_col as isize + direction + len) % len;
        self.active_col = next as usize;
    }

    fn advance_cell(&mut self) {
        if self.active_col + 1 < self.schema.fields.len() {
            self.active_col += 1;
        } else if self.active_row + 1 < self.rows.len() {
            self.active_row += 1;
            self.active_col = 0;
        } else if !self.is_map() {
            self.focus = TableFocus::AddRow;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::schema::{FieldSpec, Schema, ValueType};
    use crate::core::value::Value;
    use crate::providers::FilePayload;
    use crate::table::{TableEvent, TableView};
    use crate::terminal::{KeyCode, KeyEvent};

    fn table() -> TableView {
        let schema = Schema::list(vec![
            FieldSpec::new("name", ValueType::Text),
            FieldSpec::new("photo", ValueType::Image),
        ]);
        TableView::new(schema, Value::Collection(Vec::new()))
    }

    #[test]
    fn tab_cycles_through_columns() {
        let mut table = table();
        assert_eq!(table.active_cell_pos(), (0, 0));
        table.handle_key(KeyEvent::new(KeyCode::Tab));
        assert_eq!(table.active_cell_pos(), (0, 1));
        table.handle_key(KeyEvent::new(KeyCode::Tab));
        assert_eq!(table.active_cell_pos(), (0, 0));
    }

    #[test]
    fn down_past_the_last_row_reaches_add_row() {
        let mut table = table();
        table.handle_key(KeyEvent::new(KeyCode::Down));
        table.handle_key(KeyEvent::new(KeyCode::Enter));
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.active_cell_pos(), (1, 0));
    }

    #[test]
    fn image_cell_requests_a_file_and_accepts_the_payload() {
        let mut table = table();
        table.handle_key(KeyEvent::new(KeyCode::Tab));
        let interaction = table.handle_key(KeyEvent::new(KeyCode::Enter));
        assert_eq!(interaction.events, vec![TableEvent::FileRequested]);

        assert!(table.apply_file(FilePayload::new("QUJD", "cat.png")));
        let collected = table.collect();
        let Value::Collection(rows) = collected else {
            panic!("expected a collection");
        };
        let Value::Record(record) = &rows[0] else {
            panic!("expected a record row");
        };
        let (_, filename) = record.get("photo").and_then(Value::as_image).unwrap();
        assert_eq!(filename, "cat.png");
    }

    #[test]
    fn ctrl_n_inside_an_expanded_subtable_adds_to_the_subtable() {
        let inner = Schema::list(vec![FieldSpec::new("b", ValueType::Text)]);
        let schema = Schema::list(vec![FieldSpec::new(
            "a",
            ValueType::List(Box::new(inner)),
        )]);
        let mut table = TableView::new(schema, Value::Collection(Vec::new()));
        table.handle_key(KeyEvent::new(KeyCode::Enter));
        table.handle_key(KeyEvent::ctrl(KeyCode::Char('n')));

        assert_eq!(table.row_count(), 1);
        assert_eq!(table.expanded_child(0).unwrap().row_count(), 2);

        // typing lands in the subtable's fresh row, not the parent
        table.handle_key(KeyEvent::char('z'));
        let child = table.expanded_child(0).unwrap();
        assert_eq!(child.active_cell_pos(), (1, 0));
    }

    #[test]
    fn keys_are_delegated_into_the_expanded_child() {
        let inner = Schema::list(vec![FieldSpec::new("b", ValueType::Text)]);
        let schema = Schema::list(vec![FieldSpec::new(
            "a",
            ValueType::List(Box::new(inner)),
        )]);
        let mut table = TableView::new(schema, Value::Collection(Vec::new()));
        table.handle_key(KeyEvent::new(KeyCode::Enter));
        table.handle_key(KeyEvent::char('z'));

        let child = table.expanded_child(0).unwrap();
        let Value::Collection(rows) = child.collect() else {
            panic!("expected a collection");
        };
        let Value::Record(record) = &rows[0] else {
            panic!("expected a record row");
        };
        assert_eq!(record.get("b"), Some(&Value::Text("z".into())));
    }
}
