use crate::cells::{CellBase, CellWidget, KeyResult, accent};
use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::{Span, SpanLine};

/// Free-text control restricted to numeric characters. An empty cell reads
/// back as no value; unparseable legacy text is kept as text so it stays
/// visible and editable.
pub struct NumberCell {
    base: CellBase,
    value: String,
    cursor_pos: usize,
}

impl NumberCell {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            base: CellBase::new(label),
            value: String::new(),
            cursor_pos: 0,
        }
    }

    fn accepts(ch: char) -> bool {
        ch.is_ascii_digit() || matches!(ch, '.' | '-')
    }

    fn insert(&mut self, ch: char) {
        let char_indices: Vec<usize> = self.value.char_indices().map(|(i, _)| i).collect();
        let byte_pos = if self.cursor_pos >= char_indices.len() {
            self.value.len()
        } else {
            char_indices[self.cursor_pos]
        };
        self.value.insert(byte_pos, ch);
        self.cursor_pos += 1;
    }
}

impl CellWidget for NumberCell {
    fn label(&self) -> &str {
        &self.base.label
    }

    fn seed(&mut self, value: &Value) {
        self.value = value.display_text();
        self.cursor_pos = self.value.chars().count();
    }

    fn value(&self) -> Value {
        let trimmed = self.value.trim();
        if trimmed.is_empty() {
            return Value::None;
        }
        match trimmed.parse::<f64>() {
            Ok(number) => Value::Number(number),
            Err(_) => Value::Text(trimmed.to_string()),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if Self::accepts(ch) {
                    self.insert(ch);
                }
                // non-numeric characters are swallowed, not forwarded
                KeyResult::Handled
            }
            KeyCode::Backspace => {
                if self.cursor_pos > 0 {
                    let char_indices: Vec<usize> =
                        self.value.char_indices().map(|(i, _)| i).collect();
                    self.value.remove(char_indices[self.cursor_pos - 1]);
                    self.cursor_pos -= 1;
                }
                KeyResult::Handled
            }
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
                KeyResult::Handled
            }
            KeyCode::Right => {
                self.cursor_pos = (self.cursor_pos + 1).min(self.value.chars().count());
                KeyResult::Handled
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                KeyResult::Handled
            }
            KeyCode::End => {
                self.cursor_pos = self.value.chars().count();
                KeyResult::Handled
            }
            KeyCode::Enter => KeyResult::Submit,
            _ => KeyResult::NotHandled,
        }
    }

    fn render(&self, focused: bool) -> SpanLine {
        vec![Span::styled(self.value.clone(), accent(focused))]
    }

}

#[cfg(test)]
mod tests {
    use super::NumberCell;
    use crate::cells::CellWidget;
    use crate::core::value::Value;
    use crate::terminal::KeyEvent;

    #[test]
    fn filters_non_numeric_characters() {
        let mut cell = NumberCell::new("x");
        for ch in "1a2b.5".chars() {
            cell.handle_key(KeyEvent::char(ch));
        }
        assert_eq!(cell.value(), Value::Number(12.5));
    }

    #[test]
    fn empty_reads_back_as_no_value() {
        let cell = NumberCell::new("x");
        assert_eq!(cell.value(), Value::None);
    }

    #[test]
    fn unparseable_text_is_kept() {
        let mut cell = NumberCell::new("x");
        cell.seed(&Value::Text("1.2.3".to_string()));
        assert_eq!(cell.value(), Value::Text("1.2.3".to_string()));
    }
}
