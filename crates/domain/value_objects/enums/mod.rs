pub mod document_types;
pub mod movement_kinds;
pub mod policy_statuses;
pub mod user_statuses;
