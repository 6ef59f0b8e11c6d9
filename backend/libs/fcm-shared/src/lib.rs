/// FCM Shared Library
///
/// Firebase Cloud Messaging client used by the push relay.
///
/// It handles:
/// - Loading the service-account credential (env vars or JSON)
/// - Signing RS256 JWT-bearer assertions
/// - Exchanging assertions for OAuth2 access tokens
/// - Delivering a notification to a single device token
pub mod assertion;
pub mod client;
pub mod credentials;
pub mod errors;
pub mod models;
pub mod oauth;

pub use assertion::{AssertionClaims, AssertionSigner};
pub use client::{FCMClient, FcmClientConfig};
pub use credentials::ServiceAccountKey;
pub use errors::FCMError;
pub use models::{AccessToken, FCMSendResult};
