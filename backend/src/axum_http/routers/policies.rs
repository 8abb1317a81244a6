use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use crates::{
    domain::{
        repositories::{catalog::CatalogRepository, policies::PolicyRepository},
        value_objects::quotes::QuoteRequestModel,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{catalog::CatalogPostgres, policies::PolicyPostgres},
    },
};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    axum_http::error_responses::{self, AppError},
    usecases::{policies::PoliciesUseCase, quote_resolver::QuoteResolver},
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let policy_repository = PolicyPostgres::new(Arc::clone(&db_pool));
    let catalog_repository = CatalogPostgres::new(Arc::clone(&db_pool));
    let quote_resolver = QuoteResolver::new(Arc::new(catalog_repository));
    let policies_usecase =
        PoliciesUseCase::new(Arc::new(policy_repository), Arc::new(quote_resolver));

    Router::new()
        .route(
            "/",
            post(activate::<PolicyPostgres, CatalogPostgres>)
                .get(list::<PolicyPostgres, CatalogPostgres>),
        )
        .route("/:policy_id", get(get_policy::<PolicyPostgres, CatalogPostgres>))
        .route(
            "/:policy_id/claim",
            post(claim::<PolicyPostgres, CatalogPostgres>),
        )
        .with_state(Arc::new(policies_usecase))
}

pub async fn activate<P, C>(
    State(policies_usecase): State<Arc<PoliciesUseCase<P, C>>>,
    auth: AuthUser,
    WithRejection(Json(quote_request_model), _): WithRejection<Json<QuoteRequestModel>, AppError>,
) -> impl IntoResponse
where
    P: PolicyRepository + Send + Sync + 'static,
    C: CatalogRepository + Send + Sync + 'static,
{
    match policies_usecase
        .activate(auth.user_id, quote_request_model)
        .await
    {
        Ok(activated) => (StatusCode::CREATED, Json(activated)).into_response(),
        Err(err) => error_responses::usecase_error(err),
    }
}

pub async fn list<P, C>(
    State(policies_usecase): State<Arc<PoliciesUseCase<P, C>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    P: PolicyRepository + Send + Sync + 'static,
    C: CatalogRepository + Send + Sync + 'static,
{
    match policies_usecase.list(auth.user_id).await {
        Ok(policies) => Json(policies).into_response(),
        Err(err) => error_responses::usecase_error(err),
    }
}

pub async fn get_policy<P, C>(
    State(policies_usecase): State<Arc<PoliciesUseCase<P, C>>>,
    auth: AuthUser,
    WithRejection(Path(policy_id), _): WithRejection<Path<Uuid>, AppError>,
) -> impl IntoResponse
where
    P: PolicyRepository + Send + Sync + 'static,
    C: CatalogRepository + Send + Sync + 'static,
{
    match policies_usecase.get(auth.user_id, policy_id).await {
        Ok(policy) => Json(policy).into_response(),
        Err(err) => error_responses::usecase_error(err),
    }
}

pub async fn claim<P, C>(
    State(policies_usecase): State<Arc<PoliciesUseCase<P, C>>>,
    auth: AuthUser,
    WithRejection(Path(policy_id), _): WithRejection<Path<Uuid>, AppError>,
) -> impl IntoResponse
where
    P: PolicyRepository + Send + Sync + 'static,
    C: CatalogRepository + Send + Sync + 'static,
{
    match policies_usecase.claim(auth.user_id, policy_id).await {
        Ok(policy) => Json(policy).into_response(),
        Err(err) => error_responses::usecase_error(err),
    }
}
