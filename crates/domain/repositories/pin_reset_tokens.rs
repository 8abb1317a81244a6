use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::pin_reset_tokens::{InsertPinResetTokenEntity, PinResetTokenEntity};

#[automock]
#[async_trait]
pub trait PinResetTokenRepository {
    async fn latest_issued_at(&self, user_id: Uuid) -> Result<Option<DateTime<Utc>>>;

    async fn create(&self, insert_pin_reset_token_entity: InsertPinResetTokenEntity)
    -> Result<Uuid>;

    /// Unused and unexpired at `now`.
    async fn find_usable(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<PinResetTokenEntity>>;

    /// Marks the token used and replaces the user's PIN hash atomically.
    /// Returns `false` if the token was consumed concurrently.
    async fn consume(
        &self,
        token_id: Uuid,
        user_id: Uuid,
        pin_hash: String,
        now: DateTime<Utc>,
    ) -> Result<bool>;
}
