use thiserror::Error;

/// FCM Client Error Types
///
/// `Config` and `Signing` are operator problems and are never worth retrying.
/// `TokenExchange` and `Send` are the two remote failure points of a push and
/// are kept apart so logs can tell them apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FCMError {
    #[error("Invalid FCM configuration: {0}")]
    Config(String),

    #[error("Failed to sign JWT assertion: {0}")]
    Signing(String),

    #[error("Failed to get access token: {0}")]
    TokenExchange(String),

    #[error("FCM API error: {status} - {body}")]
    Send { status: u16, body: String },

    #[error("FCM send request failed: {0}")]
    Transport(String),

    #[error("{0} request timed out")]
    Timeout(&'static str),

    #[error("Invalid device token")]
    InvalidToken,
}

impl FCMError {
    /// Pipeline stage the error belongs to, used as a log field and metric label
    pub fn stage(&self) -> &'static str {
        match self {
            FCMError::Config(_) => "config",
            FCMError::Signing(_) => "signing",
            FCMError::TokenExchange(_) => "token_exchange",
            FCMError::Send { .. } => "send",
            FCMError::Transport(_) => "transport",
            FCMError::Timeout(_) => "timeout",
            FCMError::InvalidToken => "validation",
        }
    }

    /// Text handed back to whoever asked for the push.
    ///
    /// Gateway rejections are passed through verbatim.
    pub fn caller_detail(&self) -> String {
        match self {
            FCMError::Send { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the failure means the instance itself is misconfigured
    pub fn is_fatal(&self) -> bool {
        matches!(self, FCMError::Config(_) | FCMError::Signing(_))
    }
}
