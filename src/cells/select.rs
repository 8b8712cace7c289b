use crate::cells::{CellBase, CellWidget, KeyResult, accent};
use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine};

/// Drop-down over an externally supplied option list. A seeded value that is
/// not among the options is kept as an extra option so legacy data survives
/// an untouched commit.
pub struct SelectCell {
    base: CellBase,
    options: Vec<String>,
    selected: Option<usize>,
}

impl SelectCell {
    pub fn new(label: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            base: CellBase::new(label),
            options,
            selected: None,
        }
    }

    fn current(&self) -> Option<&str> {
        self.selected
            .and_then(|idx| self.options.get(idx))
            .map(String::as_str)
    }

    fn move_prev(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let len = self.options.len();
        self.selected = Some(match self.selected {
            Some(idx) => (idx + len - 1) % len,
            None => len - 1,
        });
    }

    fn move_next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let len = self.options.len();
        self.selected = Some(match self.selected {
            Some(idx) => (idx + 1) % len,
            None => 0,
        });
    }
}

impl CellWidget for SelectCell {
    fn label(&self) -> &str {
        &self.base.label
    }

    fn seed(&mut self, value: &Value) {
        let text = value.display_text();
        if text.is_empty() {
            self.selected = None;
            return;
        }
        match self.options.iter().position(|opt| *opt == text) {
            Some(idx) => self.selected = Some(idx),
            None => {
                self.options.insert(0, text);
                self.selected = Some(0);
            }
        }
    }

    fn value(&self) -> Value {
        Value::Text(self.current().unwrap_or("").to_string())
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        match key.code {
            KeyCode::Left | KeyCode::Up => {
                self.move_prev();
                KeyResult::Handled
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => {
                self.move_next();
                KeyResult::Handled
            }
            KeyCode::Enter => KeyResult::Submit,
            _ => KeyResult::NotHandled,
        }
    }

    fn render(&self, focused: bool) -> SpanLine {
        let option = self.current().unwrap_or("");
        let text = if focused {
            format!("<{option}>")
        } else {
            option.to_string()
        };
        vec![Span::styled(text, accent(focused))]
    }

}
