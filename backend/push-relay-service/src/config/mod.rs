use fcm_shared::{FcmClientConfig, ServiceAccountKey};
use std::env;
use std::time::Duration;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub fcm: FcmConfig,
    pub relay: RelayConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub port: u16,
    /// `json` switches the log formatter to JSON lines
    pub log_format: String,
}

#[derive(Debug, Clone)]
pub struct FcmConfig {
    pub credentials: ServiceAccountKey,
    pub client: FcmClientConfig,
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Max in-flight relay calls per fan-out
    pub fanout_concurrency: usize,
    /// HS256 secret for caller bearer tokens; caller auth is off when unset
    pub caller_jwt_secret: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let defaults = FcmClientConfig::default();

        Ok(Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                port: parse_var("APP_PORT", 8080)?,
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
            },
            fcm: FcmConfig {
                credentials: load_credentials()?,
                client: FcmClientConfig {
                    token_uri: env::var("FCM_TOKEN_URI").unwrap_or(defaults.token_uri),
                    send_base_url: env::var("FCM_SEND_BASE_URL")
                        .unwrap_or(defaults.send_base_url),
                    request_timeout: Duration::from_secs(parse_var(
                        "FCM_REQUEST_TIMEOUT_SECS",
                        defaults.request_timeout.as_secs(),
                    )?),
                    connect_timeout: Duration::from_secs(parse_var(
                        "FCM_CONNECT_TIMEOUT_SECS",
                        defaults.connect_timeout.as_secs(),
                    )?),
                },
            },
            relay: RelayConfig {
                fanout_concurrency: parse_var::<usize>("RELAY_FANOUT_CONCURRENCY", 8)?.max(1),
                caller_jwt_secret: env::var("RELAY_CALLER_JWT_SECRET")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
            },
        })
    }
}

/// Prefer a service-account JSON file, fall back to the three FCM_* variables
fn load_credentials() -> Result<ServiceAccountKey, AppError> {
    match env::var("GOOGLE_APPLICATION_CREDENTIALS") {
        Ok(path) if !path.trim().is_empty() => {
            let json = std::fs::read_to_string(&path).map_err(|e| {
                AppError::Config(format!("cannot read service account file {}: {}", path, e))
            })?;
            ServiceAccountKey::from_json(&json).map_err(|e| AppError::Config(e.to_string()))
        }
        _ => ServiceAccountKey::from_env().map_err(|e| AppError::Config(e.to_string())),
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} must be valid: {}", name, e))),
        Err(_) => Ok(default),
    }
}
