use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::pin_reset_tokens;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = pin_reset_tokens)]
pub struct PinResetTokenEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = pin_reset_tokens)]
pub struct InsertPinResetTokenEntity {
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}
