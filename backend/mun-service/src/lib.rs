/// MUN Service Library
///
/// Backend for a Model United Nations conference portal: delegate, chair and
/// administrator sessions, live crisis updates, committee messaging,
/// resolution drafting and a personal speech repository.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers per resource group
/// - `models`: Data structures and the pure rules behind them
/// - `services`: Business logic and SQL
/// - `routes`: Route table shared by the binary and tests
/// - `security`: Password hashing
/// - `db`: Pool creation and embedded migrations
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Domain metrics
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod security;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
