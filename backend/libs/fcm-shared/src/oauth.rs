/// JWT-bearer grant (RFC 7523) against the Google token endpoint
use tracing::{debug, warn};

use crate::errors::FCMError;
use crate::models::{AccessToken, GoogleTokenResponse};

pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Exchange a signed assertion for a bearer access token
pub async fn exchange_assertion(
    http_client: &reqwest::Client,
    token_uri: &str,
    assertion: &str,
) -> Result<AccessToken, FCMError> {
    let params = [("grant_type", JWT_BEARER_GRANT_TYPE), ("assertion", assertion)];

    let response = http_client
        .post(token_uri)
        .form(&params)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                FCMError::Timeout("token exchange")
            } else {
                FCMError::TokenExchange(e.to_string())
            }
        })?;

    let status = response.status();
    let text = response.text().await.map_err(|e| {
        if e.is_timeout() {
            FCMError::Timeout("token exchange")
        } else {
            FCMError::TokenExchange(format!("failed to read token response: {}", e))
        }
    })?;

    if !status.is_success() {
        warn!(status = status.as_u16(), "token endpoint rejected assertion");
        return Err(FCMError::TokenExchange(format!(
            "token request failed with status {}: {}",
            status.as_u16(),
            text
        )));
    }

    let parsed: GoogleTokenResponse = serde_json::from_str(&text)
        .map_err(|e| FCMError::TokenExchange(format!("failed to parse token response: {}", e)))?;

    match parsed.access_token {
        Some(token) if !token.is_empty() => {
            debug!(expires_in = ?parsed.expires_in, "access token minted");
            Ok(AccessToken {
                token,
                expires_in: parsed.expires_in,
            })
        }
        _ => Err(FCMError::TokenExchange(format!(
            "token response missing access_token{}",
            parsed
                .error
                .map(|e| format!(" ({})", e))
                .unwrap_or_default()
        ))),
    }
}
