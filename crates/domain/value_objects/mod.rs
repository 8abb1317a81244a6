pub mod accounts;
pub mod catalog;
pub mod enums;
pub mod policies;
pub mod policy_lifecycle;
pub mod premium;
pub mod quotes;
pub mod rate_table;
pub mod wallet;
