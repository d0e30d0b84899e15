/// Speech repository handlers
use crate::error::Result;
use crate::models::{Identity, SaveSpeechRequest, Speech};
use crate::services::SpeechService;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

#[utoipa::path(
    get,
    path = "/api/v1/speeches",
    tag = "speeches",
    responses((status = 200, body = [Speech])),
    security(("bearer_auth" = []))
)]
pub async fn list_speeches(pool: web::Data<PgPool>, identity: Identity) -> Result<HttpResponse> {
    let speeches = SpeechService::new(pool.get_ref().clone())
        .list(&identity)
        .await?;
    Ok(HttpResponse::Ok().json(speeches))
}

#[utoipa::path(
    post,
    path = "/api/v1/speeches",
    tag = "speeches",
    request_body = SaveSpeechRequest,
    responses((status = 201, body = Speech), (status = 400), (status = 403)),
    security(("bearer_auth" = []))
)]
pub async fn create_speech(
    pool: web::Data<PgPool>,
    identity: Identity,
    req: web::Json<SaveSpeechRequest>,
) -> Result<HttpResponse> {
    let speech = SpeechService::new(pool.get_ref().clone())
        .create(&identity, &req)
        .await?;
    Ok(HttpResponse::Created().json(speech))
}

#[utoipa::path(
    put,
    path = "/api/v1/speeches/{speech_id}",
    tag = "speeches",
    params(("speech_id" = String, Path, description = "Four-digit speech id")),
    request_body = SaveSpeechRequest,
    responses((status = 200, body = Speech), (status = 403), (status = 404)),
    security(("bearer_auth" = []))
)]
pub async fn update_speech(
    pool: web::Data<PgPool>,
    identity: Identity,
    speech_id: web::Path<String>,
    req: web::Json<SaveSpeechRequest>,
) -> Result<HttpResponse> {
    let speech = SpeechService::new(pool.get_ref().clone())
        .update(&identity, &speech_id, &req)
        .await?;
    Ok(HttpResponse::Ok().json(speech))
}

pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/speeches")
            .service(
                web::resource("")
                    .route(web::get().to(list_speeches))
                    .route(web::post().to(create_speech)),
            )
            .route("/{speech_id}", web::put().to(update_speech)),
    );
}
