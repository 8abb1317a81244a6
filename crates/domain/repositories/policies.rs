use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::policies::{InsertPolicyEntity, PolicyEntity},
    value_objects::policies::ActivationOutcome,
};

#[automock]
#[async_trait]
pub trait PolicyRepository {
    /// Debits the premium, records the movement and inserts the policy in one
    /// transaction, holding a row lock on the user for its duration.
    async fn activate(&self, insert_policy_entity: InsertPolicyEntity)
    -> Result<ActivationOutcome>;

    /// Newest coverage window first.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<PolicyEntity>>;

    async fn find_for_user(&self, policy_id: Uuid, user_id: Uuid) -> Result<Option<PolicyEntity>>;

    /// Sets the claimed flag if it is still unset. Returns the updated row, or
    /// `None` when no unclaimed policy matched.
    async fn mark_claimed(
        &self,
        policy_id: Uuid,
        user_id: Uuid,
        claimed_at: DateTime<Utc>,
    ) -> Result<Option<PolicyEntity>>;
}
