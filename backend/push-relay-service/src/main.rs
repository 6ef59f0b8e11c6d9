use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use fcm_shared::FCMClient;
use push_relay_service::{
    handlers::register_routes,
    metrics,
    middleware::{CallerAuthMiddleware, CallerVerifier},
    Config, PushRelay,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info".into());
    if config.app.log_format == "json" {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!(env = %config.app.env, "Starting push relay service");

    // Key parsing happens here so a broken credential stops the process
    // before it accepts traffic.
    let fcm_client = FCMClient::new(config.fcm.credentials.clone(), config.fcm.client.clone())
        .context("invalid FCM service account credential")?;
    let relay = PushRelay::new(Arc::new(fcm_client));
    tracing::info!(project_id = %relay.project_id(), "FCM client initialized");

    let verifier = config
        .relay
        .caller_jwt_secret
        .as_deref()
        .map(|secret| Arc::new(CallerVerifier::new(secret)));
    if verifier.is_none() {
        tracing::warn!("RELAY_CALLER_JWT_SECRET not set, /send-push accepts unauthenticated callers");
    }

    let relay_config = config.relay.clone();
    let addr = format!("0.0.0.0:{}", config.app.port);
    tracing::info!("Starting HTTP server on {}", addr);

    HttpServer::new(move || {
        let auth = CallerAuthMiddleware::new(verifier.clone());
        App::new()
            .app_data(web::Data::new(relay.clone()))
            .app_data(web::Data::new(relay_config.clone()))
            .wrap(middleware::Logger::default())
            .wrap(metrics::MetricsMiddleware)
            .route("/health", web::get().to(|| async { "OK" }))
            .route("/metrics", web::get().to(metrics::serve_metrics))
            .configure(|cfg| register_routes(cfg, auth))
    })
    .bind(&addr)?
    .run()
    .await?;

    Ok(())
}
