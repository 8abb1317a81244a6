use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Deposit,
    Withdrawal,
    Premium,
}

impl Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            MovementKind::Deposit => "deposit",
            MovementKind::Withdrawal => "withdrawal",
            MovementKind::Premium => "premium",
        };
        write!(f, "{}", kind)
    }
}

impl MovementKind {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "deposit" => Some(MovementKind::Deposit),
            "withdrawal" => Some(MovementKind::Withdrawal),
            "premium" => Some(MovementKind::Premium),
            _ => None,
        }
    }
}
