use crate::core::value::Value;
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};

/// Placeholder cell for a nested collection: a `+` affordance while
/// collapsed, `−` while its subtable is shown beneath the row. The summary
/// reflects the collection length currently stored in the owning record.
pub struct ExpanderCell {
    expanded: bool,
    row_count: usize,
}

impl ExpanderCell {
    pub fn new() -> Self {
        Self {
            expanded: false,
            row_count: 0,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    pub fn seed(&mut self, value: &Value) {
        self.row_count = match value {
            Value::Collection(items) => items.len(),
            Value::Record(record) if !record.is_empty() => 1,
            _ => 0,
        };
    }

    pub fn summary(&self) -> String {
        match self.row_count {
            0 => "empty".to_string(),
            1 => "1 row".to_string(),
            n => format!("{n} rows"),
        }
    }

    pub fn render(&self, focused: bool) -> SpanLine {
        let marker = if self.expanded { "−" } else { "+" };
        let marker_style = if focused {
            Style::new().color(Color::Cyan).bold()
        } else {
            Style::new().color(Color::Green).bold()
        };
        vec![
            Span::styled(marker.to_string(), marker_style),
            Span::styled(
                format!(" {}", self.summary()),
                Style::new().color(Color::DarkGrey),
            ),
        ]
    }
}

impl Default for ExpanderCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::ExpanderCell;
    use crate::core::value::{Record, Value};
    use crate::ui::span::plain_text;

    #[test]
    fn summary_counts_rows() {
        let mut cell = ExpanderCell::new();
        assert_eq!(cell.summary(), "empty");

        cell.seed(&Value::Collection(vec![Value::Record(Record::new())]));
        assert_eq!(cell.summary(), "1 row");

        cell.seed(&Value::Collection(vec![
            Value::Record(Record::new()),
            Value::Record(Record::new()),
        ]));
        assert_eq!(cell.summary(), "2 rows");
    }

    #[test]
    fn marker_follows_expansion_state() {
        let mut cell = ExpanderCell::new();
        assert!(plain_text(&cell.render(false)).starts_with('+'));
        cell.set_expanded(true);
        assert!(plain_text(&cell.render(false)).starts_with('−'));
    }
}
