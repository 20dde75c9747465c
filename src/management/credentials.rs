use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use crate::{error::ApiError, types::Credential};

/// Process-wide, in-memory map from user identity to the current credential.
///
/// Cloning is cheap and every clone shares the same map. Writes are
/// last-write-wins; there is no persistence, so everything is lost on restart.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    credentials: Arc<RwLock<HashMap<String, Credential>>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the credential for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] if `user_id` is empty.
    pub async fn save(&self, user_id: &str, credential: Credential) -> Result<(), ApiError> {
        if user_id.trim().is_empty() {
            return Err(ApiError::InvalidArgument(
                "user id must not be empty".to_string(),
            ));
        }

        let mut lock = self.credentials.write().await;
        lock.insert(user_id.to_string(), credential);
        Ok(())
    }

    /// Swaps in `credential` only if `user_id` still holds `expected`.
    ///
    /// Returns `false` and leaves the map untouched when the entry was removed
    /// or replaced since `expected` was read.
    pub async fn replace_if_current(
        &self,
        user_id: &str,
        expected: &Credential,
        credential: Credential,
    ) -> bool {
        let mut lock = self.credentials.write().await;
        match lock.get_mut(user_id) {
            Some(current) if current == expected => {
                *current = credential;
                true
            }
            _ => false,
        }
    }

    pub async fn get(&self, user_id: &str) -> Option<Credential> {
        let lock = self.credentials.read().await;
        lock.get(user_id).cloned()
    }

    /// Deletes the credential for `user_id`. Absent keys are a no-op.
    pub async fn remove(&self, user_id: &str) {
        let mut lock = self.credentials.write().await;
        lock.remove(user_id);
    }
}
