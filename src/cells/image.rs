use crate::cells::{CellBase, CellWidget, KeyResult, accent};
use crate::core::value::Value;
use crate::providers::FilePayload;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};

/// Image field control. Choosing a file is delegated to the host
/// ([`KeyResult::RequestFile`]); the cell only holds the encoded payload and
/// shows whether a file is set.
pub struct ImageCell {
    base: CellBase,
    data: String,
    filename: String,
}

impl ImageCell {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            base: CellBase::new(label),
            data: String::new(),
            filename: String::new(),
        }
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.filename.clear();
    }
}

impl CellWidget for ImageCell {
    fn label(&self) -> &str {
        &self.base.label
    }

    fn seed(&mut self, value: &Value) {
        let (data, filename) = value.as_image().unwrap_or(("", ""));
        self.data = data.to_string();
        self.filename = filename.to_string();
    }

    fn value(&self) -> Value {
        Value::image(self.data.clone(), self.filename.clone())
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => KeyResult::RequestFile,
            KeyCode::Backspace | KeyCode::Delete => {
                self.clear();
                KeyResult::Handled
            }
            _ => KeyResult::NotHandled,
        }
    }

    fn apply_file(&mut self, payload: FilePayload) -> bool {
        self.data = payload.data;
        self.filename = payload.filename;
        true
    }

    fn render(&self, focused: bool) -> SpanLine {
        if self.filename.is_empty() {
            return vec![Span::styled(
                "(no image)",
                Style::new().color(Color::DarkGrey),
            )];
        }
        vec![Span::styled(self.filename.clone(), accent(focused))]
    }
}
