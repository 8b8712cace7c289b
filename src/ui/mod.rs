pub mod grid;
pub mod span;
pub mod style;
