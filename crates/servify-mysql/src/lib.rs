pub mod analytics_impl;
pub mod backend;

pub use backend::MySqlBackend;
