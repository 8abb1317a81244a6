use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::balance_movements::BalanceMovementEntity;

#[automock]
#[async_trait]
pub trait WalletRepository {
    /// Returns the balance after the deposit.
    async fn deposit(&self, user_id: Uuid, amount: i64) -> Result<i64>;

    /// Returns `None` when the balance does not cover `amount`; nothing is written then.
    async fn withdraw(&self, user_id: Uuid, amount: i64) -> Result<Option<i64>>;

    async fn list_movements(&self, user_id: Uuid) -> Result<Vec<BalanceMovementEntity>>;
}
