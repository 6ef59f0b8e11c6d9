use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, Ready};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

/// Claims we read from a caller token. Chat-backend session tokens carry more.
#[derive(Debug, Clone, Deserialize)]
pub struct CallerClaims {
    pub sub: Option<String>,
    pub role: Option<String>,
    pub exp: i64,
}

/// Identity of the authenticated caller, inserted into request extensions
#[derive(Debug, Clone)]
pub struct Caller {
    pub subject: Option<String>,
    pub role: Option<String>,
}

/// Verifies HS256 bearer tokens issued by the chat backend
#[derive(Clone)]
pub struct CallerVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl CallerVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<Caller, jsonwebtoken::errors::Error> {
        let data = decode::<CallerClaims>(token, &self.key, &self.validation)?;
        Ok(Caller {
            subject: data.claims.sub,
            role: data.claims.role,
        })
    }
}

/// Bearer-token gate for the relay endpoints.
///
/// Without a verifier every request passes through unchanged.
#[derive(Clone, Default)]
pub struct CallerAuthMiddleware {
    verifier: Option<Arc<CallerVerifier>>,
}

impl CallerAuthMiddleware {
    pub fn new(verifier: Option<Arc<CallerVerifier>>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CallerAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = CallerAuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CallerAuthMiddlewareService {
            service: Rc::new(service),
            verifier: self.verifier.clone(),
        }))
    }
}

pub struct CallerAuthMiddlewareService<S> {
    service: Rc<S>,
    verifier: Option<Arc<CallerVerifier>>,
}

impl<S, B> Service<ServiceRequest> for CallerAuthMiddlewareService<S>
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
        let verifier = self.verifier.clone();

        Box::pin(async move {
            let Some(verifier) = verifier else {
                return service.call(req).await;
            };

            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| {
                    actix_web::error::ErrorUnauthorized("Missing Authorization header")
                })?;

            let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                actix_web::error::ErrorUnauthorized("Invalid Authorization header format")
            })?;

            let caller = verifier.verify(token).map_err(|e| {
                tracing::warn!("caller token rejected: {}", e);
                actix_web::error::ErrorUnauthorized(format!("Invalid token: {}", e))
            })?;

            tracing::debug!(subject = ?caller.subject, role = ?caller.role, "caller authenticated");
            req.extensions_mut().insert(caller);

            service.call(req).await
        })
    }
}
