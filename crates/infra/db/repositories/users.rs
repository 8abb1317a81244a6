use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{
    RunQueryDsl,
    dsl::exists,
    insert_into,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
    select, update,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::users::{InsertUserEntity, UpdateUserProfileEntity, UserEntity},
        repositories::users::UserRepository,
        value_objects::accounts::{ContactField, DuplicateContact},
    },
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::users},
};

pub struct UserPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl UserPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

/// Default names Postgres gives the UNIQUE constraints on `users`.
fn contact_field_for_constraint(constraint: &str) -> Option<ContactField> {
    match constraint {
        "users_document_number_key" => Some(ContactField::DocumentNumber),
        "users_email_key" => Some(ContactField::Email),
        "users_phone_key" => Some(ContactField::Phone),
        _ => None,
    }
}

/// A concurrent writer can take a contact value between the `exists` check
/// and the write; that race surfaces here as a unique violation.
fn map_write_error(err: DieselError) -> anyhow::Error {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &err {
        if let Some(field) = info.constraint_name().and_then(contact_field_for_constraint) {
            return DuplicateContact(field).into();
        }
    }
    err.into()
}

#[async_trait]
impl UserRepository for UserPostgres {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = users::table
            .find(user_id)
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_document(
        &self,
        document_type: &str,
        document_number: &str,
    ) -> Result<Option<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = users::table
            .filter(users::document_type.eq(document_type))
            .filter(users::document_number.eq(document_number))
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = users::table
            .filter(users::email.eq(email))
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn document_number_taken(
        &self,
        document_number: &str,
        exclude_user_id: Option<Uuid>,
    ) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Uuid::nil() never matches a stored row, so `None` excludes nothing.
        let exclude_user_id = exclude_user_id.unwrap_or_else(Uuid::nil);

        let taken = select(exists(
            users::table
                .filter(users::document_number.eq(document_number))
                .filter(users::id.ne(exclude_user_id)),
        ))
        .get_result::<bool>(&mut conn)?;
        Ok(taken)
    }

    async fn email_taken(&self, email: &str, exclude_user_id: Option<Uuid>) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let exclude_user_id = exclude_user_id.unwrap_or_else(Uuid::nil);

        let taken = select(exists(
            users::table
                .filter(users::email.eq(email))
                .filter(users::id.ne(exclude_user_id)),
        ))
        .get_result::<bool>(&mut conn)?;
        Ok(taken)
    }

    async fn phone_taken(&self, phone: &str, exclude_user_id: Option<Uuid>) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let exclude_user_id = exclude_user_id.unwrap_or_else(Uuid::nil);

        let taken = select(exists(
            users::table
                .filter(users::phone.eq(phone))
                .filter(users::id.ne(exclude_user_id)),
        ))
        .get_result::<bool>(&mut conn)?;
        Ok(taken)
    }

    async fn register(&self, insert_user_entity: InsertUserEntity) -> Result<UserEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(users::table)
            .values(&insert_user_entity)
            .returning(UserEntity::as_returning())
            .get_result::<UserEntity>(&mut conn)
            .map_err(map_write_error)?;

        Ok(result)
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        update_user_profile_entity: UpdateUserProfileEntity,
    ) -> Result<UserEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(users::table.find(user_id))
            .set(&update_user_profile_entity)
            .returning(UserEntity::as_returning())
            .get_result::<UserEntity>(&mut conn)
            .map_err(map_write_error)?;

        Ok(result)
    }

    async fn update_pin_hash(&self, user_id: Uuid, pin_hash: String) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(users::table.find(user_id))
            .set((
                users::pin_hash.eq(pin_hash),
                users::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}
