use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use crates::domain::{
    repositories::catalog::CatalogRepository,
    value_objects::{
        quotes::{EstimateDto, EstimateQuery, Quote, QuoteRequestModel},
        rate_table::{self, DailyRate, RateTableError},
    },
};
use thiserror::Error;
use tracing::info;

use crate::{
    axum_http::error_responses::UseCaseError,
    usecases::quote_resolver::{QuoteResolver, QuotingError},
};

#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("No hay tarifa diaria para la cobertura seleccionada")]
    UnsupportedCoverage,
    #[error("El número de días debe estar entre 1 y 99")]
    DaysOutOfRange,
}

impl UseCaseError for EstimateError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl From<RateTableError> for EstimateError {
    fn from(value: RateTableError) -> Self {
        match value {
            RateTableError::UnsupportedCoverage(_) => EstimateError::UnsupportedCoverage,
            RateTableError::DaysOutOfRange(_) => EstimateError::DaysOutOfRange,
        }
    }
}

pub struct QuotesUseCase<C>
where
    C: CatalogRepository + Send + Sync + 'static,
{
    quote_resolver: Arc<QuoteResolver<C>>,
}

impl<C> QuotesUseCase<C>
where
    C: CatalogRepository + Send + Sync + 'static,
{
    pub fn new(quote_resolver: Arc<QuoteResolver<C>>) -> Self {
        Self { quote_resolver }
    }

    pub async fn quote(&self, request: QuoteRequestModel) -> Result<Quote, QuotingError> {
        let quote = self.quote_resolver.resolve(&request, Utc::now()).await?;

        info!(
            option_id = %quote.insurance_option_id,
            premium = quote.premium,
            "quotes: quote computed"
        );
        Ok(quote)
    }

    pub fn estimate(&self, query: EstimateQuery) -> Result<EstimateDto, EstimateError> {
        let premium = rate_table::estimate_premium(query.coverage, query.days)?;
        let price_per_day = rate_table::daily_rate(query.coverage)
            .ok_or(EstimateError::UnsupportedCoverage)?;

        Ok(EstimateDto {
            coverage_amount: query.coverage,
            days: query.days,
            price_per_day,
            premium,
        })
    }

    pub fn daily_rates(&self) -> Vec<DailyRate> {
        rate_table::daily_rates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates::domain::repositories::catalog::MockCatalogRepository;

    fn usecase() -> QuotesUseCase<MockCatalogRepository> {
        QuotesUseCase::new(Arc::new(QuoteResolver::new(Arc::new(
            MockCatalogRepository::new(),
        ))))
    }

    #[test]
    fn estimate_multiplies_daily_rate() {
        let estimate = usecase()
            .estimate(EstimateQuery {
                coverage: 2_000_000,
                days: 4,
            })
            .unwrap();

        assert_eq!(estimate.price_per_day, 3_000);
        assert_eq!(estimate.premium, 12_000);
    }

    #[test]
    fn estimate_rejects_out_of_range_days() {
        let err = usecase()
            .estimate(EstimateQuery {
                coverage: 5_000_000,
                days: 120,
            })
            .unwrap_err();

        assert!(matches!(err, EstimateError::DaysOutOfRange));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn estimate_rejects_unknown_coverage() {
        let err = usecase()
            .estimate(EstimateQuery {
                coverage: 3_000_000,
                days: 2,
            })
            .unwrap_err();

        assert!(matches!(err, EstimateError::UnsupportedCoverage));
    }

    #[test]
    fn lists_both_daily_rates() {
        let rates = usecase().daily_rates();

        assert_eq!(rates.len(), 2);
        assert_eq!(rates[1].price_per_day, 5_500);
    }
}
