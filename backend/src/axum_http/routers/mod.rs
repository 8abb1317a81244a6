pub mod account;
pub mod auth;
pub mod catalog;
pub mod policies;
pub mod quotes;
pub mod wallet;
