use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::users;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = users)]
pub struct UserEntity {
    pub id: Uuid,
    pub full_name: String,
    pub document_type: String,
    pub document_number: String,
    pub email: String,
    pub phone: String,
    pub pin_hash: String,
    pub balance: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = users)]
pub struct InsertUserEntity {
    pub full_name: String,
    pub document_type: String,
    pub document_number: String,
    pub email: String,
    pub phone: String,
    pub pin_hash: String,
    pub balance: i64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = users)]
pub struct UpdateUserProfileEntity {
    pub full_name: String,
    pub document_type: String,
    pub document_number: String,
    pub email: String,
    pub phone: String,
    pub updated_at: DateTime<Utc>,
}
