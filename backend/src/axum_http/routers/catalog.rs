use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::WithRejection;
use crates::{
    domain::repositories::catalog::CatalogRepository,
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::catalog::CatalogPostgres,
    },
};

use crate::{axum_http::error_responses::{self, AppError}, usecases::catalog::CatalogUseCase};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let catalog_repository = CatalogPostgres::new(Arc::clone(&db_pool));
    let catalog_usecase = CatalogUseCase::new(Arc::new(catalog_repository));

    Router::new()
        .route("/options", get(list_options::<CatalogPostgres>))
        .route("/product-lines", get(list_product_lines::<CatalogPostgres>))
        .route("/promo-codes/:code", get(find_promo_code::<CatalogPostgres>))
        .with_state(Arc::new(catalog_usecase))
}

pub async fn list_options<C>(
    State(catalog_usecase): State<Arc<CatalogUseCase<C>>>,
) -> impl IntoResponse
where
    C: CatalogRepository + Send + Sync + 'static,
{
    match catalog_usecase.list_options().await {
        Ok(options) => Json(options).into_response(),
        Err(err) => error_responses::usecase_error(err),
    }
}

pub async fn list_product_lines<C>(
    State(catalog_usecase): State<Arc<CatalogUseCase<C>>>,
) -> impl IntoResponse
where
    C: CatalogRepository + Send + Sync + 'static,
{
    Json(catalog_usecase.product_lines())
}

pub async fn find_promo_code<C>(
    State(catalog_usecase): State<Arc<CatalogUseCase<C>>>,
    WithRejection(Path(code), _): WithRejection<Path<String>, AppError>,
) -> impl IntoResponse
where
    C: CatalogRepository + Send + Sync + 'static,
{
    match catalog_usecase.find_promo_code(&code).await {
        Ok(promo) => Json(promo).into_response(),
        Err(err) => error_responses::usecase_error(err),
    }
}
