//! One-time email verification codes.
//!
//! A code is a 6-digit string keyed by email. Issuing is refused for 60
//! seconds after the previous code; a code is valid for 10 minutes and is
//! deleted once it has been verified, found expired, or guessed wrong
//! `MAX_ATTEMPTS` times.

pub mod memory;
pub mod redis;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::services::mailer::Mailer;

pub use memory::MemoryVerificationStore;
pub use self::redis::RedisVerificationStore;

pub const CODE_TTL_SECS: i64 = 10 * 60;
pub const COOLDOWN_SECS: i64 = 60;
pub const MAX_ATTEMPTS: u32 = 5;
pub const EMAIL_SUBJECT: &str = "Verify your email for LeetDesign";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationEntry {
    pub code: String,
    pub issued_at: DateTime<Utc>,
    #[serde(default)]
    pub failed_attempts: u32,
}

impl VerificationEntry {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.issued_at > Duration::seconds(CODE_TTL_SECS)
    }

    /// Whole seconds of validity left at `now`, at least one
    pub fn remaining_ttl_secs(&self, now: DateTime<Utc>) -> u64 {
        let left = CODE_TTL_SECS - (now - self.issued_at).num_seconds();
        left.max(1) as u64
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationStoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("Corrupt entry: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<VerificationStoreError> for AppError {
    fn from(err: VerificationStoreError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Key-value storage for codes. Backends differ only in durability.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    async fn get(&self, email: &str) -> Result<Option<VerificationEntry>, VerificationStoreError>;
    async fn put(&self, email: &str, entry: &VerificationEntry) -> Result<(), VerificationStoreError>;
    async fn remove(&self, email: &str) -> Result<(), VerificationStoreError>;
}

/// Lower-cased, trimmed email used as the store key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn generate_code() -> String {
    rand::rng().random_range(100_000..=999_999).to_string()
}

fn verification_email_html(code: &str) -> String {
    format!(
        "<h1>Email Verification</h1>\
         <p>Your verification code is: <strong>{code}</strong></p>\
         <p>This code will expire in 10 minutes.</p>\
         <p>If you didn't request this verification, please ignore this email.</p>"
    )
}

pub struct VerificationService {
    store: Arc<dyn VerificationStore>,
    mailer: Arc<dyn Mailer>,
    // Serializes the cooldown check and the write within this process
    issue_lock: Mutex<()>,
}

impl VerificationService {
    pub fn new(store: Arc<dyn VerificationStore>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            store,
            mailer,
            issue_lock: Mutex::new(()),
        }
    }

    pub async fn issue(&self, email: &str) -> AppResult<()> {
        self.issue_at(email, Utc::now()).await
    }

    /// Issue a fresh code as of `now` and mail it.
    pub async fn issue_at(&self, email: &str, now: DateTime<Utc>) -> AppResult<()> {
        let key = normalize_email(email);
        let _guard = self.issue_lock.lock().await;

        if let Some(existing) = self.store.get(&key).await? {
            let elapsed_ms = (now - existing.issued_at).num_milliseconds();
            let cooldown_ms = COOLDOWN_SECS * 1000;

            if !existing.is_expired(now) && elapsed_ms < cooldown_ms {
                let retry_after_secs = (cooldown_ms - elapsed_ms + 999) / 1000;
                tracing::warn!("Verification code requested for {} during cooldown", key);
                return Err(AppError::CooldownActive { retry_after_secs });
            }
        }

        let entry = VerificationEntry {
            code: generate_code(),
            issued_at: now,
            failed_attempts: 0,
        };
        self.store.put(&key, &entry).await?;

        if let Err(e) = self
            .mailer
            .send(&key, EMAIL_SUBJECT, &verification_email_html(&entry.code))
            .await
        {
            tracing::warn!("Failed to deliver verification code to {}: {}", key, e);
            // An undelivered code must not hold the cooldown
            self.store.remove(&key).await?;
            return Err(AppError::DeliveryFailure(e.to_string()));
        }

        tracing::info!("Verification code issued for {}", key);
        Ok(())
    }

    pub async fn verify(&self, email: &str, code: &str) -> AppResult<()> {
        self.verify_at(email, code, Utc::now()).await
    }

    /// Consume the code for `email` if it matches and is still valid at `now`.
    pub async fn verify_at(&self, email: &str, code: &str, now: DateTime<Utc>) -> AppResult<()> {
        let key = normalize_email(email);

        let mut entry = self
            .store
            .get(&key)
            .await?
            .ok_or(AppError::NotFound("Verification code"))?;

        if entry.is_expired(now) {
            self.store.remove(&key).await?;
            return Err(AppError::Expired);
        }

        if entry.code != code.trim() {
            entry.failed_attempts += 1;
            if entry.failed_attempts >= MAX_ATTEMPTS {
                tracing::warn!(
                    "Verification code for {} discarded after {} wrong attempts",
                    key,
                    MAX_ATTEMPTS
                );
                self.store.remove(&key).await?;
            } else {
                self.store.put(&key, &entry).await?;
            }
            return Err(AppError::Mismatch);
        }

        self.store.remove(&key).await?;
        tracing::info!("Verification code accepted for {}", key);
        Ok(())
    }
}
