pub mod analytics;
pub mod auth;
pub mod config;
pub mod error;
pub mod filter;
pub mod query;

pub use error::CoreError;
