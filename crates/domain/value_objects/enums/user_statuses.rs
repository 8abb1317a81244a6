use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Blocked,
}

impl Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            UserStatus::Active => "active",
            UserStatus::Blocked => "blocked",
        };
        write!(f, "{}", status)
    }
}

impl UserStatus {
    pub fn from_str(value: &str) -> Self {
        match value {
            "active" => UserStatus::Active,
            _ => UserStatus::Blocked,
        }
    }
}
