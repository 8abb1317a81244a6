use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use axum_extra::extract::WithRejection;
use crates::{
    domain::{
        repositories::{pin_reset_tokens::PinResetTokenRepository, users::UserRepository},
        value_objects::accounts::{
            LoginModel, PinResetConfirmModel, PinResetRequestModel, RegisterUserModel,
        },
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{pin_reset_tokens::PinResetTokenPostgres, users::UserPostgres},
    },
};
use serde_json::json;

use crate::{
    axum_http::error_responses::{self, AppError},
    config::{config_loader, config_model::DotEnvyConfig},
    usecases::{
        accounts::AccountsUseCase,
        pin_reset::{LogPinResetMailer, PinResetMailer, PinResetUseCase},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    let user_repository = Arc::new(UserPostgres::new(Arc::clone(&db_pool)));
    let token_repository = Arc::new(PinResetTokenPostgres::new(Arc::clone(&db_pool)));

    let accounts_usecase =
        AccountsUseCase::new(Arc::clone(&user_repository), config.user_secret.clone());
    let pin_reset_usecase = PinResetUseCase::new(
        user_repository,
        token_repository,
        Arc::new(LogPinResetMailer::new(config_loader::get_stage())),
        config.pin_reset.clone(),
    );

    let account_routes = Router::new()
        .route("/register", post(register::<UserPostgres>))
        .route("/login", post(login::<UserPostgres>))
        .with_state(Arc::new(accounts_usecase));

    let pin_reset_routes = Router::new()
        .route(
            "/pin-reset",
            post(request_pin_reset::<UserPostgres, PinResetTokenPostgres, LogPinResetMailer>),
        )
        .route(
            "/pin-reset/confirm",
            post(confirm_pin_reset::<UserPostgres, PinResetTokenPostgres, LogPinResetMailer>),
        )
        .with_state(Arc::new(pin_reset_usecase));

    account_routes.merge(pin_reset_routes)
}

pub async fn register<U>(
    State(accounts_usecase): State<Arc<AccountsUseCase<U>>>,
    WithRejection(Json(register_user_model), _): WithRejection<Json<RegisterUserModel>, AppError>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
{
    match accounts_usecase.register(register_user_model).await {
        Ok(profile) => (StatusCode::CREATED, Json(profile)).into_response(),
        Err(err) => error_responses::usecase_error(err),
    }
}

pub async fn login<U>(
    State(accounts_usecase): State<Arc<AccountsUseCase<U>>>,
    WithRejection(Json(login_model), _): WithRejection<Json<LoginModel>, AppError>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
{
    match accounts_usecase.login(login_model).await {
        Ok(token) => Json(token).into_response(),
        Err(err) => error_responses::usecase_error(err),
    }
}

pub async fn request_pin_reset<U, T, M>(
    State(pin_reset_usecase): State<Arc<PinResetUseCase<U, T, M>>>,
    WithRejection(Json(pin_reset_request_model), _): WithRejection<
        Json<PinResetRequestModel>,
        AppError,
    >,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    T: PinResetTokenRepository + Send + Sync + 'static,
    M: PinResetMailer + Send + Sync + 'static,
{
    match pin_reset_usecase.request(pin_reset_request_model).await {
        Ok(()) => (
            StatusCode::ACCEPTED,
            Json(json!({
                "message": "Te enviamos un enlace para restablecer tu PIN a tu correo electrónico"
            })),
        )
            .into_response(),
        Err(err) => error_responses::usecase_error(err),
    }
}

pub async fn confirm_pin_reset<U, T, M>(
    State(pin_reset_usecase): State<Arc<PinResetUseCase<U, T, M>>>,
    WithRejection(Json(pin_reset_confirm_model), _): WithRejection<
        Json<PinResetConfirmModel>,
        AppError,
    >,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    T: PinResetTokenRepository + Send + Sync + 'static,
    M: PinResetMailer + Send + Sync + 'static,
{
    match pin_reset_usecase.confirm(pin_reset_confirm_model).await {
        Ok(()) => Json(json!({ "message": "Tu PIN fue actualizado correctamente" })).into_response(),
        Err(err) => error_responses::usecase_error(err),
    }
}
