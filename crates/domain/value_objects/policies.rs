use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::policies::PolicyEntity,
    value_objects::{enums::policy_statuses::PolicyStatus, policy_lifecycle},
};

pub const POLICY_NUMBER_WIDTH: usize = 7;

pub fn format_policy_number(policy_number: i64) -> String {
    format!("{:0width$}", policy_number, width = POLICY_NUMBER_WIDTH)
}

/// Result of the atomic debit-and-insert performed on activation.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivationOutcome {
    Activated {
        policy: PolicyEntity,
        balance_after: i64,
    },
    InsufficientBalance {
        balance: i64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyDto {
    pub id: Uuid,
    pub policy_number: String,
    pub insurance_option_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub coverage_amount: i64,
    pub premium_amount: i64,
    pub promo_code: Option<String>,
    pub status: PolicyStatus,
    pub claimable: bool,
    pub claimed_at: Option<DateTime<Utc>>,
    pub closure_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PolicyDto {
    pub fn from_entity(value: PolicyEntity, now: DateTime<Utc>) -> Self {
        let status =
            policy_lifecycle::derive_status(now, value.starts_at, value.ends_at, value.claimed);
        let claimable =
            policy_lifecycle::is_claimable(now, value.starts_at, value.ends_at, value.claimed);

        Self {
            id: value.id,
            policy_number: format_policy_number(value.policy_number),
            insurance_option_id: value.insurance_option_id,
            starts_at: value.starts_at,
            ends_at: value.ends_at,
            coverage_amount: value.coverage_amount,
            premium_amount: value.premium_amount,
            promo_code: value.promo_code,
            status,
            claimable,
            claimed_at: value.claimed_at,
            closure_code: value.closure_code,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivatedPolicyDto {
    pub policy: PolicyDto,
    pub balance: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_numbers_are_zero_padded() {
        assert_eq!(format_policy_number(1), "0000001");
        assert_eq!(format_policy_number(4321), "0004321");
        assert_eq!(format_policy_number(12_345_678), "12345678");
    }
}
