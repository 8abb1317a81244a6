use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use crates::{
    domain::{
        repositories::catalog::CatalogRepository,
        value_objects::quotes::{EstimateQuery, QuoteRequestModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::catalog::CatalogPostgres,
    },
};

use crate::{
    auth::AuthUser,
    axum_http::error_responses::{self, AppError},
    usecases::{quote_resolver::QuoteResolver, quotes::QuotesUseCase},
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let catalog_repository = CatalogPostgres::new(Arc::clone(&db_pool));
    let quote_resolver = QuoteResolver::new(Arc::new(catalog_repository));
    let quotes_usecase = QuotesUseCase::new(Arc::new(quote_resolver));

    Router::new()
        .route("/", post(quote::<CatalogPostgres>))
        .route("/estimate", get(estimate::<CatalogPostgres>))
        .route("/rates", get(list_daily_rates::<CatalogPostgres>))
        .with_state(Arc::new(quotes_usecase))
}

pub async fn quote<C>(
    State(quotes_usecase): State<Arc<QuotesUseCase<C>>>,
    _auth: AuthUser,
    WithRejection(Json(quote_request_model), _): WithRejection<Json<QuoteRequestModel>, AppError>,
) -> impl IntoResponse
where
    C: CatalogRepository + Send + Sync + 'static,
{
    match quotes_usecase.quote(quote_request_model).await {
        Ok(quote) => Json(quote).into_response(),
        Err(err) => error_responses::usecase_error(err),
    }
}

pub async fn estimate<C>(
    State(quotes_usecase): State<Arc<QuotesUseCase<C>>>,
    query: Option<Query<EstimateQuery>>,
) -> impl IntoResponse
where
    C: CatalogRepository + Send + Sync + 'static,
{
    let Some(Query(estimate_query)) = query else {
        return AppError::BadRequest("coverage y days son obligatorios".to_string())
            .into_response();
    };

    match quotes_usecase.estimate(estimate_query) {
        Ok(estimate) => Json(estimate).into_response(),
        Err(err) => error_responses::usecase_error(err),
    }
}

pub async fn list_daily_rates<C>(
    State(quotes_usecase): State<Arc<QuotesUseCase<C>>>,
) -> impl IntoResponse
where
    C: CatalogRepository + Send + Sync + 'static,
{
    Json(quotes_usecase.daily_rates())
}
