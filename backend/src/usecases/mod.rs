pub mod accounts;
pub mod catalog;
pub mod pin_reset;
pub mod policies;
pub mod quote_resolver;
pub mod quotes;
pub mod wallet;
