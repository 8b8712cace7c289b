use crate::cells::{CellBase, CellWidget, KeyResult};
use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};

pub struct CheckboxCell {
    base: CellBase,
    checked: bool,
}

impl CheckboxCell {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            base: CellBase::new(label),
            checked: false,
        }
    }
}

impl CellWidget for CheckboxCell {
    fn label(&self) -> &str {
        &self.base.label
    }

    fn seed(&mut self, value: &Value) {
        self.checked = match value {
            Value::Bool(flag) => *flag,
            Value::Text(text) => matches!(text.to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
            _ => false,
        };
    }

    fn value(&self) -> Value {
        Value::Bool(self.checked)
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        match key.code {
            KeyCode::Char(' ') => {
                self.checked = !self.checked;
                KeyResult::Handled
            }
            KeyCode::Enter => KeyResult::Submit,
            _ => KeyResult::NotHandled,
        }
    }

    fn render(&self, focused: bool) -> SpanLine {
        let (symbol, color) = if self.checked {
            ("[✓]", Color::Green)
        } else {
            ("[ ]", Color::Red)
        };
        let style = if focused {
            Style::new().color(Color::Cyan).bold()
        } else {
            Style::new().color(color)
        };
        vec![Span::styled(symbol, style)]
    }
}

#[cfg(test)]
mod tests {
    use super::CheckboxCell;
    use crate::cells::CellWidget;
    use crate::core::value::Value;
    use crate::terminal::KeyEvent;

    #[test]
    fn space_toggles() {
        let mut cell = CheckboxCell::new("on");
        assert_eq!(cell.value(), Value::Bool(false));
        cell.handle_key(KeyEvent::char(' '));
        assert_eq!(cell.value(), Value::Bool(true));
        cell.handle_key(KeyEvent::char(' '));
        assert_eq!(cell.value(), Value::Bool(false));
    }

    #[test]
    fn seeds_from_legacy_text() {
        let mut cell = CheckboxCell::new("on");
        cell.seed(&Value::Text("TRUE".to_string()));
        assert_eq!(cell.value(), Value::Bool(true));
    }
}
