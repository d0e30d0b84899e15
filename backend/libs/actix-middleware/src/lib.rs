//! # Actix Middleware Library
//!
//! Shared middleware for the portal's actix services
//!
//! ## Modules
//! - `jwt_auth`: bearer-token authentication, exposes [`AuthenticatedUser`]
//! - `correlation_id`: `x-correlation-id` propagation
//! - `metrics`: Prometheus request metrics and the `/metrics` handler

pub mod correlation_id;
pub mod jwt_auth;
pub mod metrics;

pub use correlation_id::{get_correlation_id, CorrelationId, CorrelationIdMiddleware};
pub use jwt_auth::{unauthorized, AuthenticatedUser, JwtAuthMiddleware};
pub use metrics::{serve_metrics, MetricsMiddleware};
