pub mod gate;
pub mod service;
pub mod session;
pub mod state;
