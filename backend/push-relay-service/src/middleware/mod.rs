pub mod caller_auth;

pub use caller_auth::{Caller, CallerAuthMiddleware, CallerVerifier};
