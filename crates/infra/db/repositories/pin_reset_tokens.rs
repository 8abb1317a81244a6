use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{Connection, RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::pin_reset_tokens::{InsertPinResetTokenEntity, PinResetTokenEntity},
        repositories::pin_reset_tokens::PinResetTokenRepository,
    },
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{pin_reset_tokens, users},
    },
};

pub struct PinResetTokenPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PinResetTokenPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PinResetTokenRepository for PinResetTokenPostgres {
    async fn latest_issued_at(&self, user_id: Uuid) -> Result<Option<DateTime<Utc>>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = pin_reset_tokens::table
            .filter(pin_reset_tokens::user_id.eq(user_id))
            .order(pin_reset_tokens::created_at.desc())
            .select(pin_reset_tokens::created_at)
            .first::<DateTime<Utc>>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn create(
        &self,
        insert_pin_reset_token_entity: InsertPinResetTokenEntity,
    ) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(pin_reset_tokens::table)
            .values(&insert_pin_reset_token_entity)
            .returning(pin_reset_tokens::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn find_usable(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<PinResetTokenEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = pin_reset_tokens::table
            .filter(pin_reset_tokens::token_hash.eq(token_hash))
            .filter(pin_reset_tokens::used_at.is_null())
            .filter(pin_reset_tokens::expires_at.gt(now))
            .select(PinResetTokenEntity::as_select())
            .first::<PinResetTokenEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn consume(
        &self,
        token_id: Uuid,
        user_id: Uuid,
        pin_hash: String,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let consumed = conn.transaction::<bool, anyhow::Error, _>(|tx| {
            let marked = update(
                pin_reset_tokens::table
                    .filter(pin_reset_tokens::id.eq(token_id))
                    .filter(pin_reset_tokens::used_at.is_null()),
            )
            .set(pin_reset_tokens::used_at.eq(Some(now)))
            .execute(tx)?;

            if marked == 0 {
                return Ok(false);
            }

            update(users::table.find(user_id))
                .set((users::pin_hash.eq(pin_hash), users::updated_at.eq(now)))
                .execute(tx)?;

            Ok(true)
        })?;

        Ok(consumed)
    }
}
