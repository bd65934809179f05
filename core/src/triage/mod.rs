pub mod query;
pub mod render;
pub mod summary;
