pub mod checkbox;
pub mod date;
pub mod expander;
pub mod image;
pub mod number;
pub mod select;
pub mod text;
pub mod validators;

use crate::core::schema::{FieldSpec, ValueType};
use crate::core::value::Value;
use crate::providers::{FilePayload, OptionSource};
use crate::terminal::KeyEvent;
use crate::ui::span::SpanLine;
use crate::ui::style::{Color, Style};

pub use checkbox::CheckboxCell;
pub use date::DateCell;
pub use expander::ExpanderCell;
pub use image::ImageCell;
pub use number::NumberCell;
pub use select::SelectCell;
pub use text::TextCell;
pub use validators::Validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    Handled,
    NotHandled,
    Submit,
    /// The host must load a file and hand the payload back.
    RequestFile,
}

pub struct CellBase {
    pub label: String,
    pub error: Option<String>,
    pub validators: Vec<Validator>,
}

impl CellBase {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            error: None,
            validators: Vec::new(),
        }
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }
}

/// Editable control for one scalar field of one row.
pub trait CellWidget: Send {
    fn label(&self) -> &str;

    /// Replaces the control state with the given field value.
    fn seed(&mut self, value: &Value);

    /// Current control state as a value-tree node; text is trimmed.
    fn value(&self) -> Value;

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult;

    fn render(&self, focused: bool) -> SpanLine;

    /// Accepts a host-loaded file payload. Only image cells do.
    fn apply_file(&mut self, _payload: FilePayload) -> bool {
        false
    }

    fn error(&self) -> Option<&str> {
        None
    }

    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// One rendered table cell: either a scalar edit control or the expandable
/// placeholder of a nested collection.
pub enum Cell {
    Widget(Box<dyn CellWidget>),
    Expander(ExpanderCell),
}

impl Cell {
    /// Dispatches on the field's value type, seeding the control from the
    /// record's current value (or the type default when absent).
    pub fn for_field(field: &FieldSpec, seed: Option<&Value>, options: &dyn OptionSource) -> Cell {
        if field.value_type.is_collection() {
            let mut expander = ExpanderCell::new();
            if let Some(value) = seed {
                expander.seed(value);
            }
            return Cell::Expander(expander);
        }

        // select_from turns text-valued fields into a drop-down; numbers keep
        // their typed input so legacy numeric data stays parseable
        let select_key = match &field.value_type {
            ValueType::Text | ValueType::Date => field.attrs.select_from.as_deref(),
            _ => None,
        };
        let mut widget: Box<dyn CellWidget> = match select_key {
            Some(key) => Box::new(SelectCell::new(
                field.display_label(),
                options.options(key),
            )),
            None => match &field.value_type {
                ValueType::Text => {
                    let mut cell = TextCell::new(field.display_label());
                    if field.attrs.multi_line {
                        cell = cell.multi_line();
                    }
                    Box::new(cell)
                }
                ValueType::Number => Box::new(NumberCell::new(field.display_label())),
                ValueType::Date => Box::new(DateCell::new(field.display_label())),
                ValueType::Bool => Box::new(CheckboxCell::new(field.display_label())),
                ValueType::Image => Box::new(ImageCell::new(field.display_label())),
                ValueType::List(_) | ValueType::SimpleList | ValueType::Map(_) => unreachable!(),
            },
        };

        if let Some(value) = seed {
            widget.seed(value);
        }
        Cell::Widget(widget)
    }

    pub fn as_widget(&self) -> Option<&dyn CellWidget> {
        match self {
            Cell::Widget(widget) => Some(widget.as_ref()),
            Cell::Expander(_) => None,
        }
    }

    pub fn as_widget_mut(&mut self) -> Option<&mut Box<dyn CellWidget>> {
        match self {
            Cell::Widget(widget) => Some(widget),
            Cell::Expander(_) => None,
        }
    }

    pub fn as_expander(&self) -> Option<&ExpanderCell> {
        match self {
            Cell::Expander(expander) => Some(expander),
            Cell::Widget(_) => None,
        }
    }

    pub fn as_expander_mut(&mut self) -> Option<&mut ExpanderCell> {
        match self {
            Cell::Expander(expander) => Some(expander),
            Cell::Widget(_) => None,
        }
    }

    pub fn is_expander(&self) -> bool {
        matches!(self, Cell::Expander(_))
    }

    pub fn render(&self, focused: bool) -> SpanLine {
        match self {
            Cell::Widget(widget) => widget.render(focused),
            Cell::Expander(expander) => expander.render(focused),
        }
    }
}

pub(crate) fn accent(focused: bool) -> Style {
    if focused {
        Style::new().color(Color::Cyan).bold()
    } else {
        Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::Cell;
    use crate::core::schema::{FieldSpec, ValueType};
    use crate::core::value::Value;
    use crate::providers::OptionSource;
    use crate::terminal::{KeyCode, KeyEvent};

    struct Periods;

    impl OptionSource for Periods {
        fn options(&self, _key: &str) -> Vec<String> {
            vec!["weekly".to_string(), "monthly".to_string()]
        }
    }

    #[test]
    fn date_field_with_option_source_becomes_a_select() {
        let field = FieldSpec::new("period", ValueType::Date).select_from("periods");
        let mut cell = Cell::for_field(&field, None, &Periods);
        let widget = cell.as_widget_mut().unwrap();
        widget.handle_key(KeyEvent::new(KeyCode::Right));
        assert_eq!(widget.value(), Value::Text("weekly".to_string()));
    }

    #[test]
    fn number_field_keeps_typed_input_despite_option_source() {
        let field = FieldSpec::new("qty", ValueType::Number).select_from("qtys");
        let mut cell = Cell::for_field(&field, None, &Periods);
        let widget = cell.as_widget_mut().unwrap();
        widget.handle_key(KeyEvent::char('5'));
        assert_eq!(widget.value(), Value::Number(5.0));
    }
}
