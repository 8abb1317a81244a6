use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{Connection, RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::{
            balance_movements::InsertBalanceMovementEntity,
            policies::{InsertPolicyEntity, PolicyEntity},
        },
        repositories::policies::PolicyRepository,
        value_objects::{enums::movement_kinds::MovementKind, policies::ActivationOutcome},
    },
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{balance_movements, policies, users},
    },
};

pub struct PolicyPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PolicyPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PolicyRepository for PolicyPostgres {
    async fn activate(
        &self,
        insert_policy_entity: InsertPolicyEntity,
    ) -> Result<ActivationOutcome> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let user_id = insert_policy_entity.user_id;
        let premium = insert_policy_entity.premium_amount;

        let outcome = conn.transaction::<ActivationOutcome, anyhow::Error, _>(|tx| {
            // Row lock serializes activations of the same user until commit.
            let balance = users::table
                .find(user_id)
                .select(users::balance)
                .for_update()
                .get_result::<i64>(tx)?;

            if balance < premium {
                return Ok(ActivationOutcome::InsufficientBalance { balance });
            }

            let balance_after = update(users::table.find(user_id))
                .set((
                    users::balance.eq(users::balance - premium),
                    users::updated_at.eq(Utc::now()),
                ))
                .returning(users::balance)
                .get_result::<i64>(tx)?;

            let policy = insert_into(policies::table)
                .values(&insert_policy_entity)
                .returning(PolicyEntity::as_returning())
                .get_result::<PolicyEntity>(tx)?;

            insert_into(balance_movements::table)
                .values(&InsertBalanceMovementEntity {
                    user_id,
                    kind: MovementKind::Premium.to_string(),
                    amount: -premium,
                    balance_after,
                    policy_id: Some(policy.id),
                })
                .execute(tx)?;

            Ok(ActivationOutcome::Activated {
                policy,
                balance_after,
            })
        })?;

        Ok(outcome)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<PolicyEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = policies::table
            .filter(policies::user_id.eq(user_id))
            .order((policies::starts_at.desc(), policies::policy_number.desc()))
            .select(PolicyEntity::as_select())
            .load::<PolicyEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_for_user(&self, policy_id: Uuid, user_id: Uuid) -> Result<Option<PolicyEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = policies::table
            .filter(policies::id.eq(policy_id))
            .filter(policies::user_id.eq(user_id))
            .select(PolicyEntity::as_select())
            .first::<PolicyEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn mark_claimed(
        &self,
        policy_id: Uuid,
        user_id: Uuid,
        claimed_at: DateTime<Utc>,
    ) -> Result<Option<PolicyEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(
            policies::table
                .filter(policies::id.eq(policy_id))
                .filter(policies::user_id.eq(user_id))
                .filter(policies::claimed.eq(false)),
        )
        .set((
            policies::claimed.eq(true),
            policies::claimed_at.eq(Some(claimed_at)),
        ))
        .returning(PolicyEntity::as_returning())
        .get_result::<PolicyEntity>(&mut conn)
        .optional()?;

        Ok(result)
    }
}
