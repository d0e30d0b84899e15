/// Session handlers - login and the `/me` identity view
use crate::error::{AppError, Result};
use crate::metrics::LOGIN_ATTEMPTS_TOTAL;
use crate::models::{
    navigation_for, quick_actions, Identity, LoginRequest, MeResponse, Role,
};
use crate::services::{AccountService, CommitteeService};
use actix_web::{web, HttpResponse};
use crypto_core::jwt;
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: SessionUser,
}

/// Exchange email and password for a bearer token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(pool: web::Data<PgPool>, req: web::Json<LoginRequest>) -> Result<HttpResponse> {
    req.validate()?;

    let service = AccountService::new(pool.get_ref().clone());
    let identity = match service.authenticate(&req.email, &req.password).await {
        Ok(identity) => identity,
        Err(e) => {
            LOGIN_ATTEMPTS_TOTAL.with_label_values(&["rejected"]).inc();
            return Err(e);
        }
    };

    let token = jwt::generate_token_response(&identity.id, identity.role.as_str(), &identity.name)
        .map_err(|e| AppError::Internal(format!("Failed to issue session token: {e}")))?;

    LOGIN_ATTEMPTS_TOTAL.with_label_values(&["success"]).inc();
    tracing::info!(account_id = %identity.id, role = %identity.role, "login succeeded");

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token: token.access_token,
        token_type: token.token_type,
        expires_in: token.expires_in,
        user: SessionUser {
            id: identity.id,
            name: identity.name,
            role: identity.role,
        },
    }))
}

/// Current session: identity, committee, fresh resolution permissions, navigation
pub async fn me(pool: web::Data<PgPool>, identity: Identity) -> Result<HttpResponse> {
    let committee = CommitteeService::new(pool.get_ref().clone())
        .committee_for(&identity)
        .await?;

    let reso_perms = match identity.role {
        Role::Delegate => Some(
            AccountService::new(pool.get_ref().clone())
                .reso_perms(&identity.id)
                .await?,
        ),
        _ => None,
    };

    Ok(HttpResponse::Ok().json(MeResponse {
        role_label: identity.role.label(),
        navigation: navigation_for(identity.role),
        quick_actions: quick_actions(),
        id: identity.id,
        name: identity.name,
        role: identity.role,
        committee,
        reso_perms,
    }))
}

pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/login", web::post().to(login))
        .route("/me", web::get().to(me));
}
