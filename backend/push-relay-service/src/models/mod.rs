use serde::{Deserialize, Serialize};

/// Inbound push request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushRequest {
    pub token: String,
    pub title: String,
    pub body: String,
}

/// Same notification for several device tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPushRequest {
    pub tokens: Vec<String>,
    pub title: String,
    pub body: String,
}

/// Per-recipient entry of a fan-out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientOutcome {
    /// Recipient id or device token, whichever the caller addressed
    pub recipient: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecipientOutcome {
    pub fn delivered(recipient: impl Into<String>, message_id: Option<String>) -> Self {
        Self {
            recipient: recipient.into(),
            success: true,
            message_id,
            error: None,
        }
    }

    pub fn failed(recipient: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            success: false,
            message_id: None,
            error: Some(error.into()),
        }
    }
}

/// Fan-out result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FanoutSummary {
    pub success_count: usize,
    pub failure_count: usize,
    pub results: Vec<RecipientOutcome>,
}

impl FanoutSummary {
    pub fn from_results(results: Vec<RecipientOutcome>) -> Self {
        let success_count = results.iter().filter(|r| r.success).count();
        Self {
            success_count,
            failure_count: results.len() - success_count,
            results,
        }
    }
}

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    /// `{"success": true}`
    pub fn acknowledged() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            error: Some(error),
        }
    }
}
