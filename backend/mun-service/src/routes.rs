//! Route configuration
//!
//! Shared by `main` and the HTTP tests so both exercise the same table.

use crate::error::AppError;
use crate::handlers::{self, health};
use crate::openapi::ApiDoc;
use actix_middleware::{serve_metrics, JwtAuthMiddleware, MetricsMiddleware};
use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// The only `/api/v1` path reachable without a bearer token
pub const LOGIN_PATH: &str = "/api/v1/auth/login";

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err, _req| AppError::BadRequest(format!("Invalid request body: {err}")).into())
}

/// Configure all routes for the application
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}").url(ApiDoc::openapi_json_path(), ApiDoc::openapi()),
        )
        .route("/metrics", web::get().to(serve_metrics))
        // Health probes sit ahead of the authenticated scope
        .route("/api/v1/health", web::get().to(health::health_summary))
        .route("/api/v1/health/ready", web::get().to(health::readiness_summary))
        .route("/api/v1/health/live", web::get().to(health::liveness_check))
        .service(
            web::scope("/api/v1")
                .wrap(JwtAuthMiddleware::new().allow_anonymous(LOGIN_PATH))
                .wrap(MetricsMiddleware)
                .configure(handlers::auth::register_routes)
                .configure(handlers::updates::register_routes)
                .configure(handlers::messages::register_routes)
                .configure(handlers::resos::register_routes)
                .configure(handlers::speeches::register_routes)
                .configure(handlers::glossary::register_routes)
                .configure(handlers::admin::register_routes),
        );
}
