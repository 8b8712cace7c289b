use crate::cells::{CellBase, CellWidget, KeyResult, Validator, accent, validators};
use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};

pub struct TextCell {
    base: CellBase,
    value: String,
    cursor_pos: usize,
    multi_line: bool,
}

impl TextCell {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            base: CellBase::new(label),
            value: String::new(),
            cursor_pos: 0,
            multi_line: false,
        }
    }

    pub fn multi_line(mut self) -> Self {
        self.multi_line = true;
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.base = self.base.with_validator(validator);
        self
    }

    fn handle_char(&mut self, ch: char) {
        let char_indices: Vec<usize> = self.value.char_indices().map(|(i, _)| i).collect();
        let byte_pos = if self.cursor_pos >= char_indices.len() {
            self.value.len()
        } else {
            char_indices[self.cursor_pos]
        };
        self.value.insert(byte_pos, ch);
        self.cursor_pos += 1;
        self.base.error = None;
    }

    fn handle_backspace(&mut self) {
        if self.cursor_pos == 0 {
            return;
        }
        let char_indices: Vec<usize> = self.value.char_indices().map(|(i, _)| i).collect();
        let byte_pos = char_indices[self.cursor_pos - 1];
        self.value.remove(byte_pos);
        self.cursor_pos -= 1;
        self.base.error = None;
    }

    fn move_left(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    fn move_right(&mut self) {
        self.cursor_pos = (self.cursor_pos + 1).min(self.value.chars().count());
    }
}

impl CellWidget for TextCell {
    fn label(&self) -> &str {
        &self.base.label
    }

    fn seed(&mut self, value: &Value) {
        self.value = value.display_text();
        self.cursor_pos = self.value.chars().count();
    }

    fn value(&self) -> Value {
        Value::Text(self.value.trim().to_string())
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.handle_char(ch);
                KeyResult::Handled
            }
            KeyCode::Backspace => {
                self.handle_backspace();
                KeyResult::Handled
            }
            KeyCode::Left => {
                self.move_left();
                KeyResult::Handled
            }
            KeyCode::Right => {
                self.move_right();
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
            KeyCode::Enter if self.multi_line => {
                self.handle_char('\n');
                KeyResult::Handled
            }
            KeyCode::Enter => match self.validate() {
                Ok(()) => KeyResult::Submit,
                Err(message) => {
                    self.base.error = Some(message);
                    KeyResult::Handled
                }
            },
            _ => KeyResult::NotHandled,
        }
    }

    fn render(&self, focused: bool) -> SpanLine {
        // multi-line content collapses to one table line
        let text = self.value.replace('\n', "⏎");
        let mut line = vec![Span::styled(text, accent(focused))];
        if let Some(error) = &self.base.error {
            line.push(Span::styled(
                format!(" ✗ {error}"),
                Style::new().color(Color::Red),
            ));
        }
        line
    }

    fn error(&self) -> Option<&str> {
        self.base.error.as_deref()
    }

    fn validate(&self) -> Result<(), String> {
        validators::run_validators(&self.base.validators, self.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::TextCell;
    use crate::cells::{CellWidget, KeyResult};
    use crate::core::value::Value;
    use crate::terminal::{KeyCode, KeyEvent};

    #[test]
    fn typing_and_trimmed_readback() {
        let mut cell = TextCell::new("x");
        for ch in " hi ".chars() {
            cell.handle_key(KeyEvent::char(ch));
        }
        assert_eq!(cell.value(), Value::Text("hi".to_string()));
    }

    #[test]
    fn enter_submits_unless_multi_line() {
        let mut single = TextCell::new("x");
        assert_eq!(
            single.handle_key(KeyEvent::new(KeyCode::Enter)),
            KeyResult::Submit
        );

        let mut multi = TextCell::new("x").multi_line();
        multi.handle_key(KeyEvent::char('a'));
        multi.handle_key(KeyEvent::new(KeyCode::Enter));
        multi.handle_key(KeyEvent::char('b'));
        assert_eq!(multi.value(), Value::Text("a\nb".to_string()));
    }

    #[test]
    fn invalid_value_blocks_submit_and_sets_an_error() {
        let mut cell = TextCell::new("x").with_validator(crate::cells::validators::required());
        assert_eq!(
            cell.handle_key(KeyEvent::new(KeyCode::Enter)),
            KeyResult::Handled
        );
        assert!(cell.error().is_some());

        cell.handle_key(KeyEvent::char('v'));
        assert!(cell.error().is_none());
        assert_eq!(
            cell.handle_key(KeyEvent::new(KeyCode::Enter)),
            KeyResult::Submit
        );
    }

    #[test]
    fn seeds_from_number_value() {
        let mut cell = TextCell::new("x");
        cell.seed(&Value::Number(5.0));
        assert_eq!(cell.value(), Value::Text("5".to_string()));
    }
}
