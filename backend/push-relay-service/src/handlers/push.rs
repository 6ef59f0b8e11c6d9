/// Push relay handlers
use actix_web::{web, HttpResponse};
use tracing::info;

use crate::config::RelayConfig;
use crate::error::{AppError, Result};
use crate::middleware::CallerAuthMiddleware;
use crate::models::{ApiResponse, BatchPushRequest, PushRequest};
use crate::services::{relay_to_tokens, PushRelay};

/// FCM caps multicast at 500 tokens; batches follow the same limit
pub const MAX_BATCH_TOKENS: usize = 500;

/// Relay one notification
///
/// POST /send-push
pub async fn send_push(
    relay: web::Data<PushRelay>,
    req: web::Json<PushRequest>,
) -> Result<HttpResponse> {
    let request = req.into_inner();
    if request.token.trim().is_empty() {
        return Err(AppError::BadRequest("token is required".to_string()));
    }

    relay.relay(&request).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::acknowledged()))
}

/// Relay one notification to many device tokens
///
/// POST /send-push/batch
pub async fn send_push_batch(
    relay: web::Data<PushRelay>,
    relay_config: web::Data<RelayConfig>,
    req: web::Json<BatchPushRequest>,
) -> Result<HttpResponse> {
    let request = req.into_inner();
    if request.tokens.is_empty() {
        return Err(AppError::BadRequest("tokens must not be empty".to_string()));
    }
    if request.tokens.len() > MAX_BATCH_TOKENS {
        return Err(AppError::BadRequest(format!(
            "at most {} tokens per batch",
            MAX_BATCH_TOKENS
        )));
    }

    let summary = relay_to_tokens(
        &relay,
        &request.tokens,
        &request.title,
        &request.body,
        relay_config.fanout_concurrency,
    )
    .await;

    info!(
        success = summary.success_count,
        failure = summary.failure_count,
        "batch relay finished"
    );

    Ok(HttpResponse::Ok().json(summary))
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig, auth: CallerAuthMiddleware) {
    cfg.service(
        web::scope("/send-push")
            .app_data(json_config())
            .wrap(auth)
            .route("", web::post().to(send_push))
            .route("/batch", web::post().to(send_push_batch)),
    );
}
