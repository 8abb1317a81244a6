pub mod catalog;
pub mod pin_reset_tokens;
pub mod policies;
pub mod users;
pub mod wallet;
