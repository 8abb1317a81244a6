use std::sync::Arc;

use axum::http::StatusCode;
use crates::domain::{
    repositories::wallet::WalletRepository,
    value_objects::wallet::{AmountModel, BalanceDto, BalanceMovementDto},
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::axum_http::error_responses::UseCaseError;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Por favor ingrese un monto válido")]
    InvalidAmount,
    #[error("Saldo insuficiente")]
    InsufficientFunds,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl UseCaseError for WalletError {
    fn status_code(&self) -> StatusCode {
        match self {
            WalletError::InvalidAmount | WalletError::InsufficientFunds => StatusCode::BAD_REQUEST,
            WalletError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, WalletError>;

pub struct WalletUseCase<W>
where
    W: WalletRepository + Send + Sync + 'static,
{
    wallet_repository: Arc<W>,
}

impl<W> WalletUseCase<W>
where
    W: WalletRepository + Send + Sync + 'static,
{
    pub fn new(wallet_repository: Arc<W>) -> Self {
        Self { wallet_repository }
    }

    pub async fn deposit(&self, user_id: Uuid, model: AmountModel) -> UseCaseResult<BalanceDto> {
        let amount = validate_amount(model.amount)?;

        let balance = self
            .wallet_repository
            .deposit(user_id, amount)
            .await
            .map_err(|err| {
                error!(%user_id, amount, db_error = ?err, "wallet: deposit failed");
                WalletError::Internal(err)
            })?;

        info!(%user_id, amount, balance, "wallet: deposit recorded");
        Ok(BalanceDto { balance })
    }

    pub async fn withdraw(&self, user_id: Uuid, model: AmountModel) -> UseCaseResult<BalanceDto> {
        let amount = validate_amount(model.amount)?;

        let balance = self
            .wallet_repository
            .withdraw(user_id, amount)
            .await
            .map_err(|err| {
                error!(%user_id, amount, db_error = ?err, "wallet: withdrawal failed");
                WalletError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(%user_id, amount, "wallet: withdrawal exceeds balance");
                WalletError::InsufficientFunds
            })?;

        info!(%user_id, amount, balance, "wallet: withdrawal recorded");
        Ok(BalanceDto { balance })
    }

    pub async fn list_movements(&self, user_id: Uuid) -> UseCaseResult<Vec<BalanceMovementDto>> {
        let movements = self
            .wallet_repository
            .list_movements(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "wallet: failed to list movements");
                WalletError::Internal(err)
            })?;

        Ok(movements.into_iter().map(BalanceMovementDto::from).collect())
    }
}

fn validate_amount(amount: i64) -> UseCaseResult<i64> {
    if amount <= 0 {
        return Err(WalletError::InvalidAmount);
    }
    Ok(amount)
}
