use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    entities::{insurance_options::InsuranceOptionEntity, promo_codes::PromoCodeEntity},
    value_objects::premium::{self, PremiumError},
};

#[derive(Debug, Error, PartialEq)]
pub enum QuoteError {
    #[error("start {starts_at} is earlier than now {now}")]
    StartInPast {
        starts_at: DateTime<Utc>,
        now: DateTime<Utc>,
    },
    #[error("promo code {code} does not apply to option {option_id}")]
    PromoOptionMismatch { code: String, option_id: Uuid },
    #[error("coverage starting at {starts_at} cannot be extended by {days} days")]
    StartOutOfRange { starts_at: DateTime<Utc>, days: i32 },
    #[error("coverage days must be positive, got {0}")]
    InvalidCoverageDays(i32),
    #[error(transparent)]
    Premium(#[from] PremiumError),
}

/// Request body shared by the quote and activation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteRequestModel {
    pub insurance_option_id: Option<Uuid>,
    pub promo_code: Option<String>,
    pub starts_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    pub insurance_option_id: Uuid,
    pub insurance_option_name: String,
    pub coverage_amount: i64,
    pub coverage_days: i32,
    pub base_premium: i64,
    pub discount: Option<f64>,
    pub premium: i64,
    pub promo_code: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EstimateQuery {
    pub coverage: i64,
    pub days: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EstimateDto {
    pub coverage_amount: i64,
    pub days: i32,
    pub price_per_day: i64,
    pub premium: i64,
}

/// Prices `option` for a coverage window starting at `starts_at`.
///
/// With a promo the duration comes from the promo and its discount is applied
/// to the option's premium; the promo must point at `option`.
pub fn build_quote(
    option: &InsuranceOptionEntity,
    promo: Option<&PromoCodeEntity>,
    starts_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<Quote, QuoteError> {
    if starts_at < now {
        return Err(QuoteError::StartInPast { starts_at, now });
    }

    if let Some(promo) = promo {
        if promo.insurance_option_id != option.id {
            return Err(QuoteError::PromoOptionMismatch {
                code: promo.code.clone(),
                option_id: option.id,
            });
        }
    }

    let coverage_days = promo.map_or(option.coverage_days, |promo| promo.coverage_days);
    if coverage_days <= 0 {
        return Err(QuoteError::InvalidCoverageDays(coverage_days));
    }

    let ends_at = starts_at
        .checked_add_signed(Duration::days(i64::from(coverage_days)))
        .ok_or(QuoteError::StartOutOfRange {
            starts_at,
            days: coverage_days,
        })?;

    let discount = promo.map(|promo| promo.discount);
    let premium = premium::compute_premium(option.premium_amount, discount)?;

    Ok(Quote {
        insurance_option_id: option.id,
        insurance_option_name: option.name.clone(),
        coverage_amount: option.coverage_amount,
        coverage_days,
        base_premium: option.premium_amount,
        discount,
        premium,
        promo_code: promo.map(|promo| promo.code.clone()),
        starts_at,
        ends_at,
    })
}
