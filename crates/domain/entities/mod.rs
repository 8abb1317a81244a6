pub mod balance_movements;
pub mod insurance_options;
pub mod pin_reset_tokens;
pub mod policies;
pub mod promo_codes;
pub mod users;
