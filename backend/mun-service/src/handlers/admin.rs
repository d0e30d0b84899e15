/// Administration handlers - account provisioning and committee listing
use crate::error::Result;
use crate::models::{Committee, CreateAccountRequest, CreatedAccount, Identity, Role};
use crate::services::{AccountService, CommitteeService};
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/v1/admin/accounts",
    tag = "admin",
    request_body = CreateAccountRequest,
    responses((status = 201, body = CreatedAccount), (status = 403), (status = 409)),
    security(("bearer_auth" = []))
)]
pub async fn create_account(
    pool: web::Data<PgPool>,
    identity: Identity,
    req: web::Json<CreateAccountRequest>,
) -> Result<HttpResponse> {
    identity.require_role(&[Role::Admin], "Only administrators can create accounts")?;
    req.validate()?;

    let account = AccountService::new(pool.get_ref().clone())
        .create_account(&req)
        .await?;
    Ok(HttpResponse::Created().json(account))
}

#[utoipa::path(
    get,
    path = "/api/v1/committees",
    tag = "admin",
    responses((status = 200, body = [Committee])),
    security(("bearer_auth" = []))
)]
pub async fn list_committees(pool: web::Data<PgPool>, _identity: Identity) -> Result<HttpResponse> {
    let committees = CommitteeService::new(pool.get_ref().clone()).list().await?;
    Ok(HttpResponse::Ok().json(committees))
}

pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/admin/accounts", web::post().to(create_account))
        .route("/committees", web::get().to(list_committees));
}
