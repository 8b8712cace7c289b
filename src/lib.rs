pub mod cells;
pub mod core;
pub mod editor;
pub mod providers;
pub mod table;
pub mod terminal;
pub mod ui;

pub use crate::core::codec;
pub use crate::core::commit;
pub use crate::core::registry;
pub use crate::core::schema;
pub use crate::core::value;

pub use cells::expander;
pub use cells::validators;

pub use editor::Editor;
pub use providers::{FilePayload, NoOptions, OptionSource};
pub use table::TableView;

pub use terminal::input_event;

pub use ui::span;
pub use ui::style;
