use crate::models::{glossary, Identity};
use actix_web::{web, HttpResponse};

pub async fn get_glossary(_identity: Identity) -> HttpResponse {
    HttpResponse::Ok().json(glossary())
}

pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/glossary", web::get().to(get_glossary));
}
