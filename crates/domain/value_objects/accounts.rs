use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    entities::users::UserEntity,
    value_objects::enums::{document_types::DocumentType, user_statuses::UserStatus},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterUserModel {
    pub full_name: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub email: String,
    pub phone: String,
    pub pin: String,
    pub confirm_pin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginModel {
    pub document_type: DocumentType,
    pub document_number: String,
    pub pin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateProfileModel {
    pub full_name: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangePinModel {
    pub current_pin: String,
    pub new_pin: String,
    pub confirm_pin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PinResetRequestModel {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PinResetConfirmModel {
    pub token: String,
    pub new_pin: String,
    pub confirm_pin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessTokenDto {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserProfileDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfileDto {
    pub id: Uuid,
    pub full_name: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub email: String,
    pub phone: String,
    pub balance: i64,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl From<UserEntity> for UserProfileDto {
    fn from(value: UserEntity) -> Self {
        Self {
            id: value.id,
            full_name: value.full_name,
            document_type: DocumentType::from_str(&value.document_type),
            document_number: value.document_number,
            email: value.email,
            phone: value.phone,
            balance: value.balance,
            status: UserStatus::from_str(&value.status),
            created_at: value.created_at,
        }
    }
}

/// Fields that must be unique across accounts, in the order they are checked.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    DocumentNumber,
    Email,
    Phone,
}

/// Raised by storage when a unique contact column rejects a write.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{0:?} is already registered")]
pub struct DuplicateContact(pub ContactField);

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles");

    static ref PHONE_REGEX: Regex = Regex::new(r"^[0-9]+$").expect("phone pattern compiles");

    static ref PIN_REGEX: Regex = Regex::new(r"^[0-9]{4}$").expect("PIN pattern compiles");
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

pub fn is_valid_pin(pin: &str) -> bool {
    PIN_REGEX.is_match(pin)
}
