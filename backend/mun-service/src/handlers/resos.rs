/// Resolution handlers - drafts and chair-managed edit permissions
use crate::error::Result;
use crate::models::{
    DelegateWithPerms, EditorToggleResponse, Identity, Reso, ResoPerms, SaveResoRequest,
};
use crate::services::ResoService;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

/// Resolutions visible to the caller
#[utoipa::path(
    get,
    path = "/api/v1/resos",
    tag = "resolutions",
    responses(
        (status = 200, body = [Reso]),
        (status = 403, description = "Only delegates and chairs can manage resolutions")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_resos(pool: web::Data<PgPool>, identity: Identity) -> Result<HttpResponse> {
    let resos = ResoService::new(pool.get_ref().clone()).list(&identity).await?;
    Ok(HttpResponse::Ok().json(resos))
}

/// Post a new resolution or update an existing one
#[utoipa::path(
    post,
    path = "/api/v1/resos",
    tag = "resolutions",
    request_body = SaveResoRequest,
    responses(
        (status = 201, description = "Resolution posted", body = Reso),
        (status = 200, description = "Resolution updated", body = Reso),
        (status = 400), (status = 403), (status = 409)
    ),
    security(("bearer_auth" = []))
)]
pub async fn save_reso(
    pool: web::Data<PgPool>,
    identity: Identity,
    req: web::Json<SaveResoRequest>,
) -> Result<HttpResponse> {
    let saved = ResoService::new(pool.get_ref().clone())
        .save(&identity, &req)
        .await?;

    if saved.created {
        Ok(HttpResponse::Created().json(saved.reso))
    } else {
        Ok(HttpResponse::Ok().json(saved.reso))
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/delegates",
    tag = "resolutions",
    responses((status = 200, body = [DelegateWithPerms])),
    security(("bearer_auth" = []))
)]
pub async fn list_delegates(pool: web::Data<PgPool>, identity: Identity) -> Result<HttpResponse> {
    let delegates = ResoService::new(pool.get_ref().clone())
        .committee_delegates(&identity)
        .await?;
    Ok(HttpResponse::Ok().json(delegates))
}

#[utoipa::path(
    post,
    path = "/api/v1/resos/{reso_id}/editors/{delegate_id}",
    tag = "resolutions",
    params(
        ("reso_id" = String, Path),
        ("delegate_id" = String, Path)
    ),
    responses((status = 200, body = EditorToggleResponse)),
    security(("bearer_auth" = []))
)]
pub async fn toggle_editor(
    pool: web::Data<PgPool>,
    identity: Identity,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (reso_id, delegate_id) = path.into_inner();
    let response = ResoService::new(pool.get_ref().clone())
        .toggle_editor(&identity, &reso_id, &delegate_id)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

pub async fn set_reso_perms(
    pool: web::Data<PgPool>,
    identity: Identity,
    delegate_id: web::Path<String>,
    perms: web::Json<ResoPerms>,
) -> Result<HttpResponse> {
    let delegate = ResoService::new(pool.get_ref().clone())
        .set_perms(&identity, &delegate_id, &perms)
        .await?;
    Ok(HttpResponse::Ok().json(delegate))
}

pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/resos")
            .service(
                web::resource("")
                    .route(web::get().to(list_resos))
                    .route(web::post().to(save_reso)),
            )
            .route(
                "/{reso_id}/editors/{delegate_id}",
                web::post().to(toggle_editor),
            ),
    )
    .service(
        web::scope("/delegates")
            .route("", web::get().to(list_delegates))
            .route("/{delegate_id}/reso-perms", web::put().to(set_reso_perms)),
    );
}
