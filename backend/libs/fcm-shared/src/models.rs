use serde::{Deserialize, Serialize};

/// FCM Send Result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FCMSendResult {
    /// `projects/<id>/messages/<id>` when the gateway reports one
    pub message_id: Option<String>,
}

/// Bearer token minted through the JWT-bearer grant
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_in: Option<i64>,
}

impl AccessToken {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Google OAuth2 Token Response
///
/// Every field is optional so a body without `access_token` is reported as a
/// token-exchange failure rather than a parse error.
#[derive(Debug, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// FCM Message Request
#[derive(Debug, Serialize)]
pub struct FcmMessage {
    pub message: FcmMessageContent,
}

impl FcmMessage {
    /// High-priority notification addressed to one device
    pub fn to_device(device_token: &str, title: &str, body: &str) -> Self {
        Self {
            message: FcmMessageContent {
                token: device_token.to_string(),
                notification: FcmNotification {
                    title: title.to_string(),
                    body: body.to_string(),
                },
                android: AndroidConfig {
                    priority: AndroidPriority::High,
                },
            },
        }
    }
}

/// FCM Message Content
#[derive(Debug, Serialize)]
pub struct FcmMessageContent {
    pub token: String,
    pub notification: FcmNotification,
    pub android: AndroidConfig,
}

/// FCM Notification Payload
#[derive(Debug, Serialize)]
pub struct FcmNotification {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct AndroidConfig {
    pub priority: AndroidPriority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AndroidPriority {
    Normal,
    High,
}

/// FCM API Response
#[derive(Debug, Deserialize)]
pub struct FcmApiResponse {
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wire_format() {
        let message = FcmMessage::to_device("abc123", "Hi", "there");
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "message": {
                    "token": "abc123",
                    "notification": { "title": "Hi", "body": "there" },
                    "android": { "priority": "high" }
                }
            })
        );
    }

    #[test]
    fn test_token_response_without_access_token() {
        let parsed: GoogleTokenResponse =
            serde_json::from_str(r#"{"error":"invalid_grant","error_description":"Invalid JWT"}"#)
                .unwrap();
        assert!(parsed.access_token.is_none());
        assert_eq!(parsed.error.as_deref(), Some("invalid_grant"));
    }

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken {
            token: "ya29.secret".to_string(),
            expires_in: Some(3599),
        };
        assert_eq!(token.bearer(), "Bearer ya29.secret");
        assert!(!format!("{:?}", token).contains("ya29"));
    }
}
