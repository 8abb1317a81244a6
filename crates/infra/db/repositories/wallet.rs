use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{Connection, RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::balance_movements::{BalanceMovementEntity, InsertBalanceMovementEntity},
        repositories::wallet::WalletRepository,
        value_objects::enums::movement_kinds::MovementKind,
    },
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{balance_movements, users},
    },
};

pub struct WalletPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl WalletPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl WalletRepository for WalletPostgres {
    async fn deposit(&self, user_id: Uuid, amount: i64) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let balance_after = conn.transaction::<i64, anyhow::Error, _>(|tx| {
            let balance_after = update(users::table.find(user_id))
                .set((
                    users::balance.eq(users::balance + amount),
                    users::updated_at.eq(Utc::now()),
                ))
                .returning(users::balance)
                .get_result::<i64>(tx)?;

            insert_into(balance_movements::table)
                .values(&InsertBalanceMovementEntity {
                    user_id,
                    kind: MovementKind::Deposit.to_string(),
                    amount,
                    balance_after,
                    policy_id: None,
                })
                .execute(tx)?;

            Ok(balance_after)
        })?;

        Ok(balance_after)
    }

    async fn withdraw(&self, user_id: Uuid, amount: i64) -> Result<Option<i64>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let balance_after = conn.transaction::<Option<i64>, anyhow::Error, _>(|tx| {
            // The balance guard lives in the WHERE clause so concurrent withdrawals cannot overdraw.
            let balance_after = update(
                users::table
                    .filter(users::id.eq(user_id))
                    .filter(users::balance.ge(amount)),
            )
            .set((
                users::balance.eq(users::balance - amount),
                users::updated_at.eq(Utc::now()),
            ))
            .returning(users::balance)
            .get_result::<i64>(tx)
            .optional()?;

            if let Some(balance_after) = balance_after {
                insert_into(balance_movements::table)
                    .values(&InsertBalanceMovementEntity {
                        user_id,
                        kind: MovementKind::Withdrawal.to_string(),
                        amount: -amount,
                        balance_after,
                        policy_id: None,
                    })
                    .execute(tx)?;
            }

            Ok(balance_after)
        })?;

        Ok(balance_after)
    }

    async fn list_movements(&self, user_id: Uuid) -> Result<Vec<BalanceMovementEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = balance_movements::table
            .filter(balance_movements::user_id.eq(user_id))
            .order(balance_movements::created_at.desc())
            .select(BalanceMovementEntity::as_select())
            .load::<BalanceMovementEntity>(&mut conn)?;

        Ok(results)
    }
}
