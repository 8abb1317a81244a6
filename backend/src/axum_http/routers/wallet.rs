use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use crates::{
    domain::{repositories::wallet::WalletRepository, value_objects::wallet::AmountModel},
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::wallet::WalletPostgres,
    },
};

use crate::{
    auth::AuthUser,
    axum_http::error_responses::{self, AppError},
    usecases::wallet::WalletUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let wallet_repository = WalletPostgres::new(Arc::clone(&db_pool));
    let wallet_usecase = WalletUseCase::new(Arc::new(wallet_repository));

    Router::new()
        .route("/deposit", post(deposit::<WalletPostgres>))
        .route("/withdraw", post(withdraw::<WalletPostgres>))
        .route("/movements", get(list_movements::<WalletPostgres>))
        .with_state(Arc::new(wallet_usecase))
}

pub async fn deposit<W>(
    State(wallet_usecase): State<Arc<WalletUseCase<W>>>,
    auth: AuthUser,
    WithRejection(Json(amount_model), _): WithRejection<Json<AmountModel>, AppError>,
) -> impl IntoResponse
where
    W: WalletRepository + Send + Sync + 'static,
{
    match wallet_usecase.deposit(auth.user_id, amount_model).await {
        Ok(balance) => Json(balance).into_response(),
        Err(err) => error_responses::usecase_error(err),
    }
}

pub async fn withdraw<W>(
    State(wallet_usecase): State<Arc<WalletUseCase<W>>>,
    auth: AuthUser,
    WithRejection(Json(amount_model), _): WithRejection<Json<AmountModel>, AppError>,
) -> impl IntoResponse
where
    W: WalletRepository + Send + Sync + 'static,
{
    match wallet_usecase.withdraw(auth.user_id, amount_model).await {
        Ok(balance) => Json(balance).into_response(),
        Err(err) => error_responses::usecase_error(err),
    }
}

pub async fn list_movements<W>(
    State(wallet_usecase): State<Arc<WalletUseCase<W>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    W: WalletRepository + Send + Sync + 'static,
{
    match wallet_usecase.list_movements(auth.user_id).await {
        Ok(movements) => Json(movements).into_response(),
        Err(err) => error_responses::usecase_error(err),
    }
}
