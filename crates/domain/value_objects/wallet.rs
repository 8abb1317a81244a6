use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::balance_movements::BalanceMovementEntity,
    value_objects::enums::movement_kinds::MovementKind,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AmountModel {
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceDto {
    pub balance: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceMovementDto {
    pub id: Uuid,
    pub kind: Option<MovementKind>,
    pub amount: i64,
    pub balance_after: i64,
    pub policy_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<BalanceMovementEntity> for BalanceMovementDto {
    fn from(value: BalanceMovementEntity) -> Self {
        Self {
            id: value.id,
            kind: MovementKind::from_str(&value.kind),
            amount: value.amount,
            balance_after: value.balance_after,
            policy_id: value.policy_id,
            created_at: value.created_at,
        }
    }
}
