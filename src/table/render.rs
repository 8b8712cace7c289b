use super::*;

use crate::ui::grid;
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use unicode_width::UnicodeWidthStr;

const MIN_COL_WIDTH: usize = 6;

impl TableView {
    pub fn render(&self) -> Vec<SpanLine> {
        self.render_with_focus(true)
    }

    /// Renders this level; `focused` suppresses the active-cell accent while
    /// keys are routed elsewhere (e.g. into an expanded subtable).
    pub fn render_with_focus(&self, focused: bool) -> Vec<SpanLine> {
        let col_widths = self.compute_col_widths();
        let mut widths = Vec::<usize>::new();
        if !self.is_map() {
            // leading delete-control column
            widths.push(1);
        }
        widths.extend_from_slice(col_widths.as_slice());

        let mut lines = Vec::<SpanLine>::new();
        lines.push(grid::border_line('┌', '┬', '┐', widths.as_slice()));
        lines.push(grid::grid_row(self.header_cells(), widths.as_slice()));
        lines.push(grid::border_line('├', '┼', '┤', widths.as_slice()));

        for (row_idx, row) in self.rows.iter().enumerate() {
            let mut row_cells = Vec::<SpanLine>::new();
            if !self.is_map() {
                row_cells.push(vec![Span::styled("✗", Style::new().color(Color::Red))]);
            }
            for (col_idx, cell) in row.cells.iter().enumerate() {
                let cell_focused = focused
                    && self.focus == TableFocus::Body
                    && self.active_row == row_idx
                    && self.active_col == col_idx;
                row_cells.push(cell.render(cell_focused));
            }
            lines.push(grid::grid_row(row_cells, widths.as_slice()));

            if let Some(child) = &row.expanded {
                let child_focused = focused && self.focus == TableFocus::Child
                    && self.active_row == row_idx;
                for child_line in child.table.render_with_focus(child_focused) {
                    let mut indented = vec![Span::new("  ")];
                    indented.extend(child_line);
                    lines.push(indented);
                }
            }
        }

        if !self.is_map() {
            lines.push(grid::border_line('├', '┴', '┤', widths.as_slice()));
            lines.push(self.add_row_line(focused, widths.as_slice()));
            let total = grid::inner_width(widths.as_slice());
            lines.push(grid::border_line('└', '─', '┘', &[total.saturating_sub(2)]));
        } else {
            lines.push(grid::border_line('└', '┴', '┘', widths.as_slice()));
        }
        lines
    }

    fn header_cells(&self) -> Vec<SpanLine> {
        let mut cells = Vec::<SpanLine>::new();
        if !self.is_map() {
            cells.push(vec![Span::new(" ")]);
        }
        for field in &self.schema.fields {
            cells.push(vec![Span::styled(
                field.display_label().to_string(),
                Style::new().bold(),
            )]);
        }
        cells
    }

    fn add_row_line(&self, focused: bool, widths: &[usize]) -> SpanLine {
        let marker = if focused && self.focus == TableFocus::AddRow {
            "❯"
        } else {
            " "
        };
        grid::full_width_row(
            vec![Span::styled(
                format!("{marker} + Add row"),
                Style::new().color(Color::Green).bold(),
            )],
            widths,
        )
    }

    fn compute_col_widths(&self) -> Vec<usize> {
        self.schema
            .fields
            .iter()
            .enumerate()
            .map(|(col_idx, field)| {
                let mut width = UnicodeWidthStr::width(field.display_label()).max(MIN_COL_WIDTH);
                for row in &self.rows {
                    if let Some(cell) = row.cells.get(col_idx) {
                        width = width.max(grid::span_line_width(cell.render(false).as_slice()));
                    }
                }
                width
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::schema::{FieldSpec, Schema, ValueType};
    use crate::core::value::Value;
    use crate::table::TableView;
    use crate::ui::span::plain_text;
    use unicode_width::UnicodeWidthStr;

    fn lines_of(table: &TableView) -> Vec<String> {
        table
            .render()
            .iter()
            .map(|line| plain_text(line.as_slice()))
            .collect()
    }

    #[test]
    fn list_shows_header_delete_column_and_add_row() {
        let schema = Schema::list(vec![
            FieldSpec::new("name", ValueType::Text).with_label("Name"),
            FieldSpec::new("qty", ValueType::Number),
        ]);
        let table = TableView::new(schema, Value::Collection(Vec::new()));
        let lines = lines_of(&table);

        assert!(lines[1].contains("Name"));
        assert!(lines[1].contains("qty"));
        assert!(lines[3].contains("✗"));
        assert!(lines.iter().any(|line| line.contains("+ Add row")));
    }

    #[test]
    fn map_omits_delete_column_and_add_row() {
        let schema = Schema::map(vec![FieldSpec::new("title", ValueType::Text)]);
        let table = TableView::new(schema, Value::None);
        let lines = lines_of(&table);

        assert!(!lines.iter().any(|line| line.contains("✗")));
        assert!(!lines.iter().any(|line| line.contains("+ Add row")));
    }

    #[test]
    fn all_grid_lines_share_one_width() {
        let schema = Schema::list(vec![
            FieldSpec::new("name", ValueType::Text),
            FieldSpec::new("done", ValueType::Bool),
        ]);
        let raw = Value::Collection(vec![Value::Record(
            [("name".to_string(), Value::Text("long enough value".into()))]
                .into_iter()
                .collect(),
        )]);
        let table = TableView::new(schema, raw);
        let lines = lines_of(&table);

        let width = UnicodeWidthStr::width(lines[0].as_str());
        for line in &lines {
            assert_eq!(UnicodeWidthStr::width(line.as_str()), width);
        }
    }

    #[test]
    fn expanded_subtable_renders_indented() {
        let inner = Schema::list(vec![FieldSpec::new("b", ValueType::Text)]);
        let schema = Schema::list(vec![FieldSpec::new(
            "a",
            ValueType::List(Box::new(inner)),
        )]);
        let mut table = TableView::new(schema, Value::Collection(Vec::new()));
        table.toggle_expand(0, 0);
        let lines = lines_of(&table);

        assert!(lines.iter().any(|line| line.starts_with("  ┌")));
    }
}
