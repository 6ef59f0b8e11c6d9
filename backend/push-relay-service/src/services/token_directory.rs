/// Device-token directory
///
/// Maps a recipient id to the push token the mobile client registered. The
/// real store lives in the chat backend; the relay only needs lookups.
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{AppError, Result};

#[async_trait]
pub trait TokenDirectory: Send + Sync {
    async fn lookup(&self, recipient_id: &str) -> Result<Option<String>>;
}

/// Process-local directory for tests and local runs
#[derive(Debug, Default)]
pub struct InMemoryTokenDirectory {
    tokens: RwLock<HashMap<String, String>>,
}

impl InMemoryTokenDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the token for a recipient
    pub fn register(&self, recipient_id: impl Into<String>, token: impl Into<String>) -> Result<()> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| AppError::Directory("token directory lock poisoned".to_string()))?;
        tokens.insert(recipient_id.into(), token.into());
        Ok(())
    }

    pub fn unregister(&self, recipient_id: &str) -> Result<Option<String>> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| AppError::Directory("token directory lock poisoned".to_string()))?;
        Ok(tokens.remove(recipient_id))
    }
}

#[async_trait]
impl TokenDirectory for InMemoryTokenDirectory {
    async fn lookup(&self, recipient_id: &str) -> Result<Option<String>> {
        let tokens = self
            .tokens
            .read()
            .map_err(|_| AppError::Directory("token directory lock poisoned".to_string()))?;
        Ok(tokens.get(recipient_id).cloned())
    }
}
