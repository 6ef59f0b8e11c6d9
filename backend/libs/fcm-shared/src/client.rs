use chrono::Utc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::assertion::{AssertionSigner, GOOGLE_TOKEN_AUDIENCE};
use crate::credentials::ServiceAccountKey;
use crate::errors::FCMError;
use crate::models::*;
use crate::oauth::exchange_assertion;

pub const DEFAULT_SEND_BASE_URL: &str = "https://fcm.googleapis.com";

/// Endpoints and timeouts for [`FCMClient`]
#[derive(Debug, Clone)]
pub struct FcmClientConfig {
    /// Where the assertion is POSTed. The assertion audience stays the Google
    /// token URI regardless.
    pub token_uri: String,
    pub send_base_url: String,
    /// Upper bound for each outbound call
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for FcmClientConfig {
    fn default() -> Self {
        Self {
            token_uri: GOOGLE_TOKEN_AUDIENCE.to_string(),
            send_base_url: DEFAULT_SEND_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Firebase Cloud Messaging Client
///
/// Sends notifications through the FCM HTTP v1 API. Every send mints a fresh
/// assertion and access token; nothing is cached between calls, so the client
/// can be shared freely across tasks.
pub struct FCMClient {
    pub project_id: String,
    signer: AssertionSigner,
    config: FcmClientConfig,
    http_client: reqwest::Client,
}

impl FCMClient {
    /// Create new FCM client
    ///
    /// Fails with [`FCMError::Config`] when the private key cannot be parsed or
    /// the HTTP client cannot be built. No network call is made.
    pub fn new(credentials: ServiceAccountKey, config: FcmClientConfig) -> Result<Self, FCMError> {
        let signer = AssertionSigner::from_credentials(&credentials)?;

        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| FCMError::Config(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            project_id: credentials.project_id,
            signer,
            config,
            http_client,
        })
    }

    pub fn send_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/messages:send",
            self.config.send_base_url.trim_end_matches('/'),
            self.project_id
        )
    }

    /// Sign a new assertion and trade it for an access token
    pub async fn mint_access_token(&self) -> Result<AccessToken, FCMError> {
        let assertion = self.signer.sign(Utc::now())?;
        exchange_assertion(&self.http_client, &self.config.token_uri, &assertion).await
    }

    /// Send notification via FCM to a single device
    ///
    /// One attempt only. A non-success status is returned as
    /// [`FCMError::Send`] with the gateway body untouched.
    pub async fn send(
        &self,
        device_token: &str,
        title: &str,
        body: &str,
    ) -> Result<FCMSendResult, FCMError> {
        if !self.validate_token(device_token) {
            return Err(FCMError::InvalidToken);
        }

        let access_token = self.mint_access_token().await?;
        let message = FcmMessage::to_device(device_token, title, body);

        debug!(project_id = %self.project_id, "sending FCM message");

        let response = self
            .http_client
            .post(self.send_url())
            .header(reqwest::header::AUTHORIZATION, access_token.bearer())
            .json(&message)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FCMError::Timeout("send")
                } else {
                    FCMError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FCMError::Timeout("send")
            } else {
                FCMError::Transport(format!("failed to read FCM response: {}", e))
            }
        })?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "FCM rejected message");
            return Err(FCMError::Send {
                status: status.as_u16(),
                body: text,
            });
        }

        let message_id = serde_json::from_str::<FcmApiResponse>(&text)
            .ok()
            .and_then(|r| r.name);

        info!(message_id = ?message_id, "FCM message accepted");

        Ok(FCMSendResult { message_id })
    }

    /// Validate device token format
    ///
    /// Token format is opaque to the relay; only presence is checked.
    pub fn validate_token(&self, device_token: &str) -> bool {
        !device_token.trim().is_empty()
    }
}
