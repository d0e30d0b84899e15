/// HTTP handlers, one module per resource group
///
/// Each module exposes `register_routes`, mounted under `/api/v1` by
/// [`crate::routes::configure_routes`].
pub mod admin;
pub mod auth;
pub mod glossary;
pub mod health;
pub mod messages;
pub mod resos;
pub mod speeches;
pub mod updates;
