use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::{
    insurance_options::InsuranceOptionEntity, promo_codes::PromoCodeEntity,
};

#[automock]
#[async_trait]
pub trait CatalogRepository {
    async fn list_active_options(&self) -> Result<Vec<InsuranceOptionEntity>>;

    async fn find_active_option(&self, option_id: Uuid) -> Result<Option<InsuranceOptionEntity>>;

    /// `code` is expected already normalized to upper-case.
    async fn find_active_promo_code(&self, code: &str) -> Result<Option<PromoCodeEntity>>;
}
