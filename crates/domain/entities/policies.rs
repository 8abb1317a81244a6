use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::policies;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = policies)]
pub struct PolicyEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub policy_number: i64,
    pub insurance_option_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub coverage_amount: i64,
    pub premium_amount: i64,
    pub promo_code: Option<String>,
    pub claimed: bool,
    pub claimed_at: Option<DateTime<Utc>>,
    pub closure_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

// policy_number, claimed and created_at are filled by column defaults.
#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = policies)]
pub struct InsertPolicyEntity {
    pub user_id: Uuid,
    pub insurance_option_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub coverage_amount: i64,
    pub premium_amount: i64,
    pub promo_code: Option<String>,
}
