use std::sync::Arc;

use anyhow::anyhow;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use crates::domain::{
    repositories::catalog::CatalogRepository,
    value_objects::{
        catalog,
        quotes::{self, Quote, QuoteError, QuoteRequestModel},
    },
};
use thiserror::Error;
use tracing::{debug, error};

use crate::axum_http::error_responses::UseCaseError;

#[derive(Debug, Error)]
pub enum QuotingError {
    #[error("Por favor seleccione una opción de seguro")]
    OptionRequired,
    #[error("La opción de seguro seleccionada no está disponible")]
    OptionNotFound,
    #[error("Código promocional no válido")]
    PromoCodeNotFound,
    #[error("El código promocional no aplica para la opción seleccionada")]
    PromoOptionMismatch,
    #[error("No se puede seleccionar una fecha y hora anterior a la actual")]
    StartInPast,
    #[error("La fecha de inicio está fuera del rango permitido")]
    StartOutOfRange,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl UseCaseError for QuotingError {
    fn status_code(&self) -> StatusCode {
        match self {
            QuotingError::OptionRequired
            | QuotingError::PromoOptionMismatch
            | QuotingError::StartInPast
            | QuotingError::StartOutOfRange => StatusCode::BAD_REQUEST,
            QuotingError::OptionNotFound | QuotingError::PromoCodeNotFound => {
                StatusCode::NOT_FOUND
            }
            QuotingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QuoteError> for QuotingError {
    fn from(value: QuoteError) -> Self {
        match value {
            QuoteError::StartInPast { .. } => QuotingError::StartInPast,
            QuoteError::StartOutOfRange { .. } => QuotingError::StartOutOfRange,
            QuoteError::PromoOptionMismatch { .. } => QuotingError::PromoOptionMismatch,
            // Catalog rows violating their own constraints.
            other => QuotingError::Internal(anyhow!(other)),
        }
    }
}

/// Turns a quote request into priced terms. A promo code, when present, picks the option itself.
pub struct QuoteResolver<C>
where
    C: CatalogRepository + Send + Sync + 'static,
{
    catalog_repository: Arc<C>,
}

impl<C> QuoteResolver<C>
where
    C: CatalogRepository + Send + Sync + 'static,
{
    pub fn new(catalog_repository: Arc<C>) -> Self {
        Self { catalog_repository }
    }

    pub async fn resolve(
        &self,
        request: &QuoteRequestModel,
        now: DateTime<Utc>,
    ) -> Result<Quote, QuotingError> {
        let promo = match request
            .promo_code
            .as_deref()
            .map(catalog::normalize_promo_code)
            .filter(|code| !code.is_empty())
        {
            Some(code) => Some(
                self.catalog_repository
                    .find_active_promo_code(&code)
                    .await
                    .map_err(|err| {
                        error!(%code, db_error = ?err, "quote_resolver: failed to load promo code");
                        QuotingError::Internal(err)
                    })?
                    .ok_or(QuotingError::PromoCodeNotFound)?,
            ),
            None => None,
        };

        let option_id = match (&promo, request.insurance_option_id) {
            (Some(promo), Some(option_id)) if promo.insurance_option_id != option_id => {
                return Err(QuotingError::PromoOptionMismatch);
            }
            (Some(promo), _) => promo.insurance_option_id,
            (None, Some(option_id)) => option_id,
            (None, None) => return Err(QuotingError::OptionRequired),
        };

        let option = self
            .catalog_repository
            .find_active_option(option_id)
            .await
            .map_err(|err| {
                error!(%option_id, db_error = ?err, "quote_resolver: failed to load option");
                QuotingError::Internal(err)
            })?
            .ok_or(QuotingError::OptionNotFound)?;

        debug!(
            %option_id,
            promo = promo.as_ref().map(|promo| promo.code.as_str()),
            "quote_resolver: pricing quote"
        );

        Ok(quotes::build_quote(
            &option,
            promo.as_ref(),
            request.starts_at,
            now,
        )?)
    }
}
