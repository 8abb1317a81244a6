use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::promo_codes;

/// A discount token. When applied it fixes both the insurance option and the coverage duration.
#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = promo_codes)]
pub struct PromoCodeEntity {
    pub id: Uuid,
    pub code: String,
    /// Fraction in `[0, 1]`.
    pub discount: f64,
    pub insurance_option_id: Uuid,
    pub coverage_days: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
