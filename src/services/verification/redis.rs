use async_trait::async_trait;
use chrono::Utc;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};

use super::{VerificationEntry, VerificationStore, VerificationStoreError};

/// Codes stored as JSON under `verification:{email}` with a TTL ending at
/// the code's expiry, so stale keys clean themselves up.
pub struct RedisVerificationStore {
    conn: MultiplexedConnection,
}

impl RedisVerificationStore {
    /// Opens one multiplexed connection; every operation works on a clone of it.
    pub async fn connect(redis_url: &str) -> Result<Self, VerificationStoreError> {
        let client = Client::open(redis_url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(Self { conn })
    }

    fn key(email: &str) -> String {
        format!("verification:{}", email)
    }
}

#[async_trait]
impl VerificationStore for RedisVerificationStore {
    async fn get(&self, email: &str) -> Result<Option<VerificationEntry>, VerificationStoreError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(Self::key(email)).await?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, email: &str, entry: &VerificationEntry) -> Result<(), VerificationStoreError> {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(entry)?;
        let _: () = conn
            .set_ex(Self::key(email), json, entry.remaining_ttl_secs(Utc::now()))
            .await?;
        Ok(())
    }

    async fn remove(&self, email: &str) -> Result<(), VerificationStoreError> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(Self::key(email)).await?;
        Ok(())
    }
}
