use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::{VerificationEntry, VerificationStore, VerificationStoreError};

/// Codes held in process memory; lost on restart
#[derive(Default)]
pub struct MemoryVerificationStore {
    entries: Mutex<HashMap<String, VerificationEntry>>,
}

impl MemoryVerificationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VerificationStore for MemoryVerificationStore {
    async fn get(&self, email: &str) -> Result<Option<VerificationEntry>, VerificationStoreError> {
        Ok(self.entries.lock().await.get(email).cloned())
    }

    async fn put(&self, email: &str, entry: &VerificationEntry) -> Result<(), VerificationStoreError> {
        self.entries
            .lock()
            .await
            .insert(email.to_string(), entry.clone());
        Ok(())
    }

    async fn remove(&self, email: &str) -> Result<(), VerificationStoreError> {
        self.entries.lock().await.remove(email);
        Ok(())
    }
}
