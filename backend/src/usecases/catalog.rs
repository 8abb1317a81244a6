use std::sync::Arc;

use axum::http::StatusCode;
use crates::domain::{
    repositories::catalog::CatalogRepository,
    value_objects::catalog::{
        self, InsuranceOptionDto, PRODUCT_LINES, ProductLine, PromoCodeDto,
    },
};
use thiserror::Error;
use tracing::{error, info};

use crate::axum_http::error_responses::UseCaseError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Código promocional no válido")]
    PromoCodeNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl UseCaseError for CatalogError {
    fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::PromoCodeNotFound => StatusCode::NOT_FOUND,
            CatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, CatalogError>;

pub struct CatalogUseCase<C>
where
    C: CatalogRepository + Send + Sync + 'static,
{
    catalog_repository: Arc<C>,
}

impl<C> CatalogUseCase<C>
where
    C: CatalogRepository + Send + Sync + 'static,
{
    pub fn new(catalog_repository: Arc<C>) -> Self {
        Self { catalog_repository }
    }

    pub async fn list_options(&self) -> UseCaseResult<Vec<InsuranceOptionDto>> {
        let options = self
            .catalog_repository
            .list_active_options()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "catalog: failed to list insurance options");
                CatalogError::Internal(err)
            })?;

        Ok(options.into_iter().map(InsuranceOptionDto::from).collect())
    }

    pub fn product_lines(&self) -> Vec<ProductLine> {
        PRODUCT_LINES.to_vec()
    }

    pub async fn find_promo_code(&self, raw_code: &str) -> UseCaseResult<PromoCodeDto> {
        let code = catalog::normalize_promo_code(raw_code);
        if code.is_empty() {
            return Err(CatalogError::PromoCodeNotFound);
        }

        let promo = self
            .catalog_repository
            .find_active_promo_code(&code)
            .await
            .map_err(|err| {
                error!(%code, db_error = ?err, "catalog: failed to look up promo code");
                CatalogError::Internal(err)
            })?
            .ok_or_else(|| {
                info!(%code, "catalog: unknown promo code");
                CatalogError::PromoCodeNotFound
            })?;

        Ok(PromoCodeDto::from(promo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crates::domain::{
        entities::{insurance_options::InsuranceOptionEntity, promo_codes::PromoCodeEntity},
        repositories::catalog::MockCatalogRepository,
    };
    use uuid::Uuid;

    #[tokio::test]
    async fn lists_active_options() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_list_active_options().returning(|| {
            Ok(vec![InsuranceOptionEntity {
                id: Uuid::new_v4(),
                name: "Acgura Básico".to_string(),
                description: "Cobertura de $2.000.000".to_string(),
                coverage_amount: 2_000_000,
                premium_amount: 3_000,
                coverage_days: 1,
                is_active: true,
                created_at: Utc::now(),
            }])
        });

        let usecase = CatalogUseCase::new(Arc::new(repo));
        let options = usecase.list_options().await.unwrap();

        assert_eq!(options.len(), 1);
        assert_eq!(options[0].premium_amount, 3_000);
    }

    #[tokio::test]
    async fn promo_lookup_is_case_insensitive() {
        let option_id = Uuid::new_v4();
        let mut repo = MockCatalogRepository::new();
        repo.expect_find_active_promo_code()
            .withf(|code| code == "BIENVENIDA")
            .times(1)
            .returning(move |code| {
                Ok(Some(PromoCodeEntity {
                    id: Uuid::new_v4(),
                    code: code.to_string(),
                    discount: 0.2,
                    insurance_option_id: option_id,
                    coverage_days: 1,
                    is_active: true,
                    created_at: Utc::now(),
                }))
            });

        let usecase = CatalogUseCase::new(Arc::new(repo));
        let promo = usecase.find_promo_code(" bienvenida ").await.unwrap();

        assert_eq!(promo.code, "BIENVENIDA");
        assert_eq!(promo.insurance_option_id, option_id);
    }

    #[tokio::test]
    async fn unknown_promo_is_not_found() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_find_active_promo_code().returning(|_| Ok(None));

        let usecase = CatalogUseCase::new(Arc::new(repo));
        let err = usecase.find_promo_code("NOEXISTE").await.unwrap_err();

        assert!(matches!(err, CatalogError::PromoCodeNotFound));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn exposes_five_product_lines() {
        let usecase = CatalogUseCase::new(Arc::new(MockCatalogRepository::new()));
        let lines = usecase.product_lines();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].id, "recorrido");
    }
}
