use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::insurance_options;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = insurance_options)]
pub struct InsuranceOptionEntity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub coverage_amount: i64,
    pub premium_amount: i64,
    pub coverage_days: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
