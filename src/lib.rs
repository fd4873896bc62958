pub mod config;
pub mod constants;
pub mod engine;
pub mod logging;
pub mod session;
pub mod store;
pub mod transfer;
pub mod validation;
