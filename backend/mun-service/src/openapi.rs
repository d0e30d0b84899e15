/// OpenAPI documentation for MUN Service
use crate::handlers;
use crate::models;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MUN Portal Service API",
        version = "1.0.0",
        description = "Conference backend for Model United Nations committees: sessions, live crisis updates, committee messaging, resolution drafting with chair-managed permissions, and a personal speech repository.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    paths(
        handlers::auth::login,
        handlers::updates::list_updates,
        handlers::updates::create_update,
        handlers::messages::list_conversations,
        handlers::messages::get_thread,
        handlers::messages::send_message,
        handlers::resos::list_resos,
        handlers::resos::save_reso,
        handlers::resos::list_delegates,
        handlers::resos::toggle_editor,
        handlers::speeches::list_speeches,
        handlers::speeches::create_speech,
        handlers::speeches::update_speech,
        handlers::admin::create_account,
        handlers::admin::list_committees,
    ),
    components(schemas(
        handlers::auth::LoginResponse,
        handlers::auth::SessionUser,
        models::LoginRequest,
        models::Role,
        models::Update,
        models::CreateUpdateRequest,
        models::Message,
        models::ConversationSummary,
        models::SendMessageRequest,
        models::Reso,
        models::ResoPerms,
        models::SaveResoRequest,
        models::DelegateWithPerms,
        models::EditorToggleResponse,
        models::Speech,
        models::SaveSpeechRequest,
        models::Committee,
        models::CreateAccountRequest,
        models::CreatedAccount,
    )),
    tags(
        (name = "auth", description = "Login and session"),
        (name = "updates", description = "Live crisis bulletins"),
        (name = "messages", description = "Direct messages within a committee"),
        (name = "resolutions", description = "Resolution drafts and edit permissions"),
        (name = "speeches", description = "Personal speech repository"),
        (name = "admin", description = "Account provisioning and committees"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token from POST /api/v1/auth/login"))
                        .build(),
                ),
            )
        }
    }
}

impl ApiDoc {
    pub fn openapi_json_path() -> &'static str {
        "/api/v1/openapi.json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_bearer_scheme_and_paths() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(doc.paths.paths.contains_key("/api/v1/messages/conversations"));
        assert!(doc.paths.paths.contains_key("/api/v1/resos"));
    }
}
