pub mod dataset;
pub mod loader;
pub mod model;
pub mod timestamps;
