use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Display status of a policy. Always derived, never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PolicyStatus {
    #[serde(rename = "Activa")]
    Active,
    #[serde(rename = "Inactiva")]
    Inactive,
    #[serde(rename = "Reclamada")]
    Claimed,
    #[serde(rename = "Cerrada")]
    Closed,
}

impl Display for PolicyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            PolicyStatus::Active => "Activa",
            PolicyStatus::Inactive => "Inactiva",
            PolicyStatus::Claimed => "Reclamada",
            PolicyStatus::Closed => "Cerrada",
        };
        write!(f, "{}", status)
    }
}
