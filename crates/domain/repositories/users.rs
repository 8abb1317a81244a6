use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::users::{InsertUserEntity, UpdateUserProfileEntity, UserEntity};

#[automock]
#[async_trait]
pub trait UserRepository {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>>;

    async fn find_by_document(
        &self,
        document_type: &str,
        document_number: &str,
    ) -> Result<Option<UserEntity>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>>;

    /// `exclude_user_id` lets a profile edit keep its own values.
    async fn document_number_taken(
        &self,
        document_number: &str,
        exclude_user_id: Option<Uuid>,
    ) -> Result<bool>;

    async fn email_taken(&self, email: &str, exclude_user_id: Option<Uuid>) -> Result<bool>;

    async fn phone_taken(&self, phone: &str, exclude_user_id: Option<Uuid>) -> Result<bool>;

    async fn register(&self, insert_user_entity: InsertUserEntity) -> Result<UserEntity>;

    async fn update_profile(
        &self,
        user_id: Uuid,
        update_user_profile_entity: UpdateUserProfileEntity,
    ) -> Result<UserEntity>;

    async fn update_pin_hash(&self, user_id: Uuid, pin_hash: String) -> Result<()>;
}
