use std::sync::Arc;

use crate::core::codec;
use crate::core::commit::{self, CommitDecision};
use crate::core::schema::Schema;
use crate::core::value::Value;
use crate::providers::{FilePayload, NoOptions, OptionSource};
use crate::table::{Interaction, TableView};
use crate::terminal::KeyEvent;
use crate::ui::span::SpanLine;

/// One editing session over a stored value: decodes the stored text into the
/// root table on open, and on [`Editor::finish`] decides whether the session
/// produced anything worth writing back.
pub struct Editor {
    schema: Schema,
    table: TableView,
    /// Whether the decoded input was empty at open; an empty session over an
    /// empty input is discarded rather than committed as an empty collection.
    before_empty: bool,
}

impl Editor {
    pub fn new(schema: Schema, stored: Option<&str>) -> Self {
        Self::with_options(schema, stored, Arc::new(NoOptions))
    }

    pub fn with_options(
        schema: Schema,
        stored: Option<&str>,
        options: Arc<dyn OptionSource>,
    ) -> Self {
        let raw = stored.map(codec::parse_stored).unwrap_or(Value::None);
        let normalized = codec::normalize(&schema, raw);
        let before_empty = commit::is_empty_input(&normalized);
        let table = TableView::with_options(schema.clone(), normalized, options);
        Self {
            schema,
            table,
            before_empty,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Interaction {
        self.table.handle_key(key)
    }

    pub fn apply_file(&mut self, payload: FilePayload) -> bool {
        self.table.apply_file(payload)
    }

    pub fn render(&self) -> Vec<SpanLine> {
        self.table.render()
    }

    pub fn table(&self) -> &TableView {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TableView {
        &mut self.table
    }

    /// Current value tree, expanded subtables read live.
    pub fn collect_value(&self) -> Value {
        self.table.collect()
    }

    /// Ends the session. `Some` carries the encoded value to store; `None`
    /// means the stored value should be left untouched.
    pub fn finish(self) -> Option<String> {
        let after = self.table.collect();
        match commit::decide(&self.schema, self.before_empty, after) {
            CommitDecision::Commit(value) => Some(codec::encode(&value)),
            CommitDecision::Discard => None,
        }
    }
}
