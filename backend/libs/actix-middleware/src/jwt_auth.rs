use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    Error, HttpMessage, HttpResponse,
};
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

/// Session extracted from a validated bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Participant id (`sub` claim)
    pub id: String,
    /// Raw role claim; services map it onto their own role type
    pub role: String,
    /// Display name claim
    pub name: String,
}

/// 401 with the same `{"error", "status"}` body the services return
pub fn unauthorized(message: &'static str) -> Error {
    InternalError::from_response(
        message,
        HttpResponse::Unauthorized().json(serde_json::json!({
            "error": message,
            "status": 401,
        })),
    )
    .into()
}

/// JWT Authentication Middleware
///
/// Paths registered with [`JwtAuthMiddleware::allow_anonymous`] pass through
/// without a token (the login endpoint).
#[derive(Clone, Default)]
pub struct JwtAuthMiddleware {
    anonymous_paths: Rc<Vec<String>>,
}

impl JwtAuthMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_anonymous(mut self, path: impl Into<String>) -> Self {
        Rc::make_mut(&mut self.anonymous_paths).push(path.into());
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = JwtAuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
            anonymous_paths: self.anonymous_paths.clone(),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
    anonymous_paths: Rc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let anonymous = self.anonymous_paths.iter().any(|p| p == req.path());

        Box::pin(async move {
            if anonymous {
                return service.call(req).await;
            }

            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| unauthorized("Missing Authorization header"))?;

            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or_else(|| unauthorized("Invalid Authorization header format"))?;

            let token_data = crypto_core::jwt::validate_token(token).map_err(|e| {
                tracing::warn!("JWT validation failed: {}", e);
                unauthorized("Invalid or expired session")
            })?;

            let claims = token_data.claims;
            if claims.sub.trim().is_empty() {
                return Err(unauthorized("Invalid token: empty subject"));
            }

            req.extensions_mut().insert(AuthenticatedUser {
                id: claims.sub,
                role: claims.role,
                name: claims.name,
            });

            service.call(req).await
        })
    }
}

impl actix_web::FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(unauthorized("User not authenticated"))),
        }
    }
}
