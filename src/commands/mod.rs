pub mod find;
pub mod list;
