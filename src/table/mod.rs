mod build;
mod collect;
mod expand;
mod interaction;
mod render;

use std::sync::Arc;

use crate::cells::{Cell, CellWidget, KeyResult};
use crate::core::codec;
use crate::core::registry::{IdMinter, RegistryEntry, RowId, RowRegistry};
use crate::core::schema::Schema;
use crate::core::value::{Record, Value};
use crate::providers::{FilePayload, NoOptions, OptionSource};
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::SpanLine;

pub use interaction::Interaction;

/// Out-of-band results of a user interaction the host must act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// Non-fatal, user-visible message (e.g. expanding a nested collection
    /// whose schema defines no fields).
    Notice(String),
    /// The focused image cell wants a file; the host loads it and calls
    /// [`TableView::apply_file`].
    FileRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableFocus {
    Body,
    AddRow,
    /// Keys are delegated into the expanded subtable of the active row.
    Child,
}

struct ExpandedChild {
    id: RowId,
    field_index: usize,
    table: Box<TableView>,
}

struct RowState {
    id: RowId,
    cells: Vec<Cell>,
    expanded: Option<ExpandedChild>,
}

/// Editable view of one collection level: header, one row per record (or the
/// map's single record), per-field cells, add/delete controls and at most one
/// expanded subtable per row. Owns the row registry for this level.
pub struct TableView {
    schema: Schema,
    options: Arc<dyn OptionSource>,
    registry: RowRegistry,
    rows: Vec<RowState>,
    focus: TableFocus,
    active_row: usize,
    active_col: usize,
}

impl TableView {
    pub fn new(schema: Schema, raw: Value) -> Self {
        Self::with_options(schema, raw, Arc::new(NoOptions))
    }

    pub fn with_options(schema: Schema, raw: Value, options: Arc<dyn OptionSource>) -> Self {
        Self::new_level(schema, raw, options, IdMinter::new())
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row_id(&self, index: usize) -> Option<RowId> {
        self.rows.get(index).map(|row| row.id)
    }

    /// The stored record behind a row, as currently known to the registry.
    pub fn row_record(&self, index: usize) -> Option<&Record> {
        let id = self.row_id(index)?;
        self.registry.record(id)
    }

    pub fn registry(&self) -> &RowRegistry {
        &self.registry
    }

    pub fn expanded_child(&self, index: usize) -> Option<&TableView> {
        self.rows
            .get(index)?
            .expanded
            .as_ref()
            .map(|child| child.table.as_ref())
    }

    pub fn expanded_child_mut(&mut self, index: usize) -> Option<&mut TableView> {
        self.rows
            .get_mut(index)?
            .expanded
            .as_mut()
            .map(|child| child.table.as_mut())
    }

    pub fn active_cell_pos(&self) -> (usize, usize) {
        (self.active_row, self.active_col)
    }

    /// Moves focus to a body cell. Intended for hosts that track their own
    /// pointer position.
    pub fn set_active(&mut self, row: usize, col: usize) {
        if self.rows.is_empty() {
            self.focus = TableFocus::AddRow;
            return;
        }
        self.focus = TableFocus::Body;
        self.active_row = row.min(self.rows.len() - 1);
        self.active_col = col.min(self.schema.fields.len().saturating_sub(1));
    }

    fn is_map(&self) -> bool {
        self.schema.kind.is_map()
    }
}
