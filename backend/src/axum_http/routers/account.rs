use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use crates::{
    domain::{
        repositories::users::UserRepository,
        value_objects::accounts::{ChangePinModel, UpdateProfileModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::users::UserPostgres,
    },
};

use crate::{
    auth::AuthUser, axum_http::error_responses::{self, AppError}, config::config_model::DotEnvyConfig,
    usecases::accounts::AccountsUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let accounts_usecase =
        AccountsUseCase::new(Arc::new(user_repository), config.user_secret.clone());

    Router::new()
        .route(
            "/",
            get(get_profile::<UserPostgres>).put(update_profile::<UserPostgres>),
        )
        .route("/pin", post(change_pin::<UserPostgres>))
        .with_state(Arc::new(accounts_usecase))
}

pub async fn get_profile<U>(
    State(accounts_usecase): State<Arc<AccountsUseCase<U>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
{
    match accounts_usecase.get_profile(auth.user_id).await {
        Ok(profile) => Json(profile).into_response(),
        Err(err) => error_responses::usecase_error(err),
    }
}

pub async fn update_profile<U>(
    State(accounts_usecase): State<Arc<AccountsUseCase<U>>>,
    auth: AuthUser,
    WithRejection(Json(update_profile_model), _): WithRejection<Json<UpdateProfileModel>, AppError>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
{
    match accounts_usecase
        .update_profile(auth.user_id, update_profile_model)
        .await
    {
        Ok(profile) => Json(profile).into_response(),
        Err(err) => error_responses::usecase_error(err),
    }
}

pub async fn change_pin<U>(
    State(accounts_usecase): State<Arc<AccountsUseCase<U>>>,
    auth: AuthUser,
    WithRejection(Json(change_pin_model), _): WithRejection<Json<ChangePinModel>, AppError>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
{
    match accounts_usecase.change_pin(auth.user_id, change_pin_model).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_responses::usecase_error(err),
    }
}
