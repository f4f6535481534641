pub mod loader;
pub mod models;
pub mod schema;
pub mod validation;
