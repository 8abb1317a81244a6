use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::{insurance_options::InsuranceOptionEntity, promo_codes::PromoCodeEntity},
        repositories::catalog::CatalogRepository,
    },
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{insurance_options, promo_codes},
    },
};

pub struct CatalogPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl CatalogPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CatalogRepository for CatalogPostgres {
    async fn list_active_options(&self) -> Result<Vec<InsuranceOptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = insurance_options::table
            .filter(insurance_options::is_active.eq(true))
            .order(insurance_options::coverage_amount.asc())
            .select(InsuranceOptionEntity::as_select())
            .load::<InsuranceOptionEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_active_option(&self, option_id: Uuid) -> Result<Option<InsuranceOptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insurance_options::table
            .filter(insurance_options::id.eq(option_id))
            .filter(insurance_options::is_active.eq(true))
            .select(InsuranceOptionEntity::as_select())
            .first::<InsuranceOptionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_active_promo_code(&self, code: &str) -> Result<Option<PromoCodeEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = promo_codes::table
            .filter(promo_codes::code.eq(code))
            .filter(promo_codes::is_active.eq(true))
            .select(PromoCodeEntity::as_select())
            .first::<PromoCodeEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }
}
