pub mod auth;
pub mod cache;
pub mod config;
pub mod handlers;
pub mod models;
pub mod notify;
pub mod reports;
pub mod store;

pub use config::{AppConfig, BackendKind};
pub use store::Store;
