use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::balance_movements;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = balance_movements)]
pub struct BalanceMovementEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    /// Signed: deposits are positive, withdrawals and premiums negative.
    pub amount: i64,
    pub balance_after: i64,
    pub policy_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = balance_movements)]
pub struct InsertBalanceMovementEntity {
    pub user_id: Uuid,
    pub kind: String,
    pub amount: i64,
    pub balance_after: i64,
    pub policy_id: Option<Uuid>,
}
