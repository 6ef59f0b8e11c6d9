/// Push relay
///
/// Turns `{token, title, body}` into one FCM delivery:
/// sign assertion -> exchange for access token -> send -> report.
/// Every call walks the whole chain; nothing is shared between calls
/// except the immutable client.
use fcm_shared::{FCMClient, FCMError, FCMSendResult};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::metrics;
use crate::models::PushRequest;

#[derive(Clone)]
pub struct PushRelay {
    fcm: Arc<FCMClient>,
}

impl PushRelay {
    pub fn new(fcm: Arc<FCMClient>) -> Self {
        Self { fcm }
    }

    pub fn project_id(&self) -> &str {
        &self.fcm.project_id
    }

    /// Relay a single notification. At most one send attempt is made.
    pub async fn relay(&self, request: &PushRequest) -> Result<FCMSendResult, FCMError> {
        let start = Instant::now();
        let result = self
            .fcm
            .send(&request.token, &request.title, &request.body)
            .await;

        match &result {
            Ok(sent) => {
                info!(
                    project_id = %self.fcm.project_id,
                    message_id = ?sent.message_id,
                    "push relayed"
                );
                metrics::observe_relay("success", "none", start.elapsed());
            }
            Err(err) => {
                match err {
                    FCMError::Config(_) | FCMError::Signing(_) => {
                        error!(stage = err.stage(), error = %err, "push relay misconfigured")
                    }
                    FCMError::TokenExchange(_) => {
                        warn!(stage = err.stage(), error = %err, "could not authenticate with FCM")
                    }
                    _ => warn!(stage = err.stage(), error = %err, "FCM did not accept push"),
                }
                metrics::observe_relay("failure", err.stage(), start.elapsed());
            }
        }

        result
    }
}
