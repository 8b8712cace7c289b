use crate::cells::{CellBase, CellWidget, KeyResult, accent};
use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};

const FORMAT_HINT: &str = "YYYY-MM-DD";

/// Date-string control. Empty state shows the expected format as a
/// placeholder; the value itself stays a plain string.
pub struct DateCell {
    base: CellBase,
    value: String,
    cursor_pos: usize,
}

impl DateCell {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            base: CellBase::new(label),
            value: String::new(),
            cursor_pos: 0,
        }
    }
}

impl CellWidget for DateCell {
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
                let char_indices: Vec<usize> = self.value.char_indices().map(|(i, _)| i).collect();
                let byte_pos = if self.cursor_pos >= char_indices.len() {
                    self.value.len()
                } else {
                    char_indices[self.cursor_pos]
                };
                self.value.insert(byte_pos, ch);
                self.cursor_pos += 1;
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
            KeyCode::Enter => KeyResult::Submit,
            _ => KeyResult::NotHandled,
        }
    }

    fn render(&self, focused: bool) -> SpanLine {
        if self.value.is_empty() {
            return vec![Span::styled(
                FORMAT_HINT,
                Style::new().color(Color::DarkGrey),
            )];
        }
        vec![Span::styled(self.value.clone(), accent(focused))]
    }

}

#[cfg(test)]
mod tests {
    use super::DateCell;
    use crate::cells::CellWidget;
    use crate::core::value::Value;
    use crate::terminal::KeyEvent;
    use crate::ui::span::plain_text;

    #[test]
    fn empty_cell_shows_format_hint() {
        let cell = DateCell::new("since");
        assert_eq!(plain_text(&cell.render(false)), "YYYY-MM-DD");
    }

    #[test]
    fn typed_date_reads_back() {
        let mut cell = DateCell::new("since");
        for ch in "2026-08-28".chars() {
            cell.handle_key(KeyEvent::char(ch));
        }
        assert_eq!(cell.value(), Value::Text("2026-08-28".to_string()));
        assert_eq!(plain_text(&cell.render(false)), "2026-08-28");
    }
}
