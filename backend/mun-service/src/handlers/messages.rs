/// Messaging handlers - committee inbox
use crate::config::MessagingConfig;
use crate::error::Result;
use crate::models::{ConversationSummary, Identity, Message, SendMessageRequest, UnreadCount};
use crate::services::MessageService;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

pub const POLL_INTERVAL_HEADER: &str = "x-poll-interval";

/// Conversation list for the caller's committee
#[utoipa::path(
    get,
    path = "/api/v1/messages/conversations",
    tag = "messages",
    responses(
        (status = 200, body = [ConversationSummary]),
        (status = 404, description = "User committee not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_conversations(
    pool: web::Data<PgPool>,
    messaging: web::Data<MessagingConfig>,
    identity: Identity,
) -> Result<HttpResponse> {
    let conversations = MessageService::new(pool.get_ref().clone())
        .conversations(&identity)
        .await?;

    Ok(HttpResponse::Ok()
        .insert_header((POLL_INTERVAL_HEADER, messaging.poll_interval_secs.to_string()))
        .json(conversations))
}

/// Thread with one participant, oldest first; marks incoming messages read
#[utoipa::path(
    get,
    path = "/api/v1/messages/conversations/{participant_id}",
    tag = "messages",
    params(("participant_id" = String, Path, description = "Delegate or chair id")),
    responses((status = 200, body = [Message])),
    security(("bearer_auth" = []))
)]
pub async fn get_thread(
    pool: web::Data<PgPool>,
    identity: Identity,
    participant_id: web::Path<String>,
) -> Result<HttpResponse> {
    let messages = MessageService::new(pool.get_ref().clone())
        .thread(&identity, &participant_id)
        .await?;
    Ok(HttpResponse::Ok().json(messages))
}

#[utoipa::path(
    post,
    path = "/api/v1/messages",
    tag = "messages",
    request_body = SendMessageRequest,
    responses(
        (status = 201, body = Message),
        (status = 403, description = "Admins cannot send messages")
    ),
    security(("bearer_auth" = []))
)]
pub async fn send_message(
    pool: web::Data<PgPool>,
    identity: Identity,
    req: web::Json<SendMessageRequest>,
) -> Result<HttpResponse> {
    let message = MessageService::new(pool.get_ref().clone())
        .send(&identity, &req)
        .await?;
    Ok(HttpResponse::Created().json(message))
}

/// Delegate-to-delegate traffic in the chair's committee
pub async fn delegate_messages(pool: web::Data<PgPool>, identity: Identity) -> Result<HttpResponse> {
    let messages = MessageService::new(pool.get_ref().clone())
        .delegate_messages(&identity)
        .await?;
    Ok(HttpResponse::Ok().json(messages))
}

pub async fn unread_count(pool: web::Data<PgPool>, identity: Identity) -> Result<HttpResponse> {
    let unread = MessageService::new(pool.get_ref().clone())
        .unread_count(&identity)
        .await?;
    Ok(HttpResponse::Ok().json(UnreadCount { unread }))
}

pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/messages")
            .route("", web::post().to(send_message))
            .route("/conversations", web::get().to(list_conversations))
            .route(
                "/conversations/{participant_id}",
                web::get().to(get_thread),
            )
            .route("/delegates", web::get().to(delegate_messages))
            .route("/unread", web::get().to(unread_count)),
    );
}
