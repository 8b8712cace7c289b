pub mod codec;
pub mod commit;
pub mod registry;
pub mod schema;
pub mod value;
