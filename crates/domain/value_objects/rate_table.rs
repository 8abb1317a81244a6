use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_ESTIMATE_DAYS: i32 = 1;
pub const MAX_ESTIMATE_DAYS: i32 = 99;

/// (coverage amount, price per day), in pesos.
const DAILY_RATES: [(i64, i64); 2] = [(2_000_000, 3_000), (5_000_000, 5_500)];

#[derive(Debug, Error, PartialEq)]
pub enum RateTableError {
    #[error("no daily rate for coverage {0}")]
    UnsupportedCoverage(i64),
    #[error("days must be between {MIN_ESTIMATE_DAYS} and {MAX_ESTIMATE_DAYS}, got {0}")]
    DaysOutOfRange(i32),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyRate {
    pub coverage_amount: i64,
    pub price_per_day: i64,
}

pub fn daily_rates() -> Vec<DailyRate> {
    DAILY_RATES
        .iter()
        .map(|&(coverage_amount, price_per_day)| DailyRate {
            coverage_amount,
            price_per_day,
        })
        .collect()
}

pub fn daily_rate(coverage_amount: i64) -> Option<i64> {
    DAILY_RATES
        .iter()
        .find(|(coverage, _)| *coverage == coverage_amount)
        .map(|(_, price_per_day)| *price_per_day)
}

pub fn estimate_premium(coverage_amount: i64, days: i32) -> Result<i64, RateTableError> {
    if !(MIN_ESTIMATE_DAYS..=MAX_ESTIMATE_DAYS).contains(&days) {
        return Err(RateTableError::DaysOutOfRange(days));
    }
    let price_per_day =
        daily_rate(coverage_amount).ok_or(RateTableError::UnsupportedCoverage(coverage_amount))?;

    Ok(price_per_day * i64::from(days))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplies_daily_rate_by_days() {
        assert_eq!(estimate_premium(2_000_000, 3), Ok(9_000));
        assert_eq!(estimate_premium(5_000_000, 1), Ok(5_500));
        assert_eq!(estimate_premium(5_000_000, 99), Ok(544_500));
    }

    #[test]
    fn rejects_days_outside_range() {
        assert_eq!(
            estimate_premium(2_000_000, 0),
            Err(RateTableError::DaysOutOfRange(0))
        );
        assert_eq!(
            estimate_premium(2_000_000, 100),
            Err(RateTableError::DaysOutOfRange(100))
        );
    }

    #[test]
    fn rejects_unknown_coverage() {
        assert_eq!(
            estimate_premium(1_000_000, 2),
            Err(RateTableError::UnsupportedCoverage(1_000_000))
        );
        assert_eq!(daily_rate(1_000_000), None);
    }
}
