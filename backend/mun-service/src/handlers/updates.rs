/// Live update handlers
use crate::error::Result;
use crate::models::{CreateUpdateRequest, Identity, Update};
use crate::services::UpdateService;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

/// List bulletins, newest first
#[utoipa::path(
    get,
    path = "/api/v1/updates",
    tag = "updates",
    responses((status = 200, body = [Update])),
    security(("bearer_auth" = []))
)]
pub async fn list_updates(pool: web::Data<PgPool>, _identity: Identity) -> Result<HttpResponse> {
    let updates = UpdateService::new(pool.get_ref().clone()).list().await?;
    Ok(HttpResponse::Ok().json(updates))
}

/// Post a bulletin (chairs and administrators)
#[utoipa::path(
    post,
    path = "/api/v1/updates",
    tag = "updates",
    request_body = CreateUpdateRequest,
    responses((status = 201, body = Update), (status = 403)),
    security(("bearer_auth" = []))
)]
pub async fn create_update(
    pool: web::Data<PgPool>,
    identity: Identity,
    req: web::Json<CreateUpdateRequest>,
) -> Result<HttpResponse> {
    let update = UpdateService::new(pool.get_ref().clone())
        .create(&identity, &req)
        .await?;
    Ok(HttpResponse::Created().json(update))
}

pub async fn delete_update(
    pool: web::Data<PgPool>,
    identity: Identity,
    update_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    UpdateService::new(pool.get_ref().clone())
        .delete(&identity, update_id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/updates")
            .service(
                web::resource("")
                    .route(web::get().to(list_updates))
                    .route(web::post().to(create_update)),
            )
            .route("/{update_id}", web::delete().to(delete_update)),
    );
}
