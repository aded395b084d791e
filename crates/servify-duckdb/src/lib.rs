pub mod analytics_impl;
pub mod auth;
pub mod backend;
pub mod queries;
pub mod schema;

pub use backend::DuckDbBackend;
