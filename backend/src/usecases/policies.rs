use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use crates::domain::{
    entities::policies::InsertPolicyEntity,
    repositories::{catalog::CatalogRepository, policies::PolicyRepository},
    value_objects::{
        policies::{ActivatedPolicyDto, ActivationOutcome, PolicyDto},
        policy_lifecycle,
        quotes::QuoteRequestModel,
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    axum_http::error_responses::UseCaseError,
    usecases::quote_resolver::{QuoteResolver, QuotingError},
};

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error(transparent)]
    Quote(#[from] QuotingError),
    #[error("Saldo insuficiente para activar el seguro")]
    InsufficientBalance,
    #[error("Póliza no encontrada")]
    NotFound,
    #[error("Esta póliza no se puede reclamar")]
    NotClaimable,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl UseCaseError for PolicyError {
    fn status_code(&self) -> StatusCode {
        match self {
            PolicyError::Quote(err) => err.status_code(),
            PolicyError::InsufficientBalance => StatusCode::BAD_REQUEST,
            PolicyError::NotFound => StatusCode::NOT_FOUND,
            PolicyError::NotClaimable => StatusCode::CONFLICT,
            PolicyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, PolicyError>;

pub struct PoliciesUseCase<P, C>
where
    P: PolicyRepository + Send + Sync + 'static,
    C: CatalogRepository + Send + Sync + 'static,
{
    policy_repository: Arc<P>,
    quote_resolver: Arc<QuoteResolver<C>>,
}

impl<P, C> PoliciesUseCase<P, C>
where
    P: PolicyRepository + Send + Sync + 'static,
    C: CatalogRepository + Send + Sync + 'static,
{
    pub fn new(policy_repository: Arc<P>, quote_resolver: Arc<QuoteResolver<C>>) -> Self {
        Self {
            policy_repository,
            quote_resolver,
        }
    }

    /// Prices the request, then debits and issues the policy in a single transaction.
    pub async fn activate(
        &self,
        user_id: Uuid,
        request: QuoteRequestModel,
    ) -> UseCaseResult<ActivatedPolicyDto> {
        let now = Utc::now();
        let quote = self.quote_resolver.resolve(&request, now).await?;

        let outcome = self
            .policy_repository
            .activate(InsertPolicyEntity {
                user_id,
                insurance_option_id: quote.insurance_option_id,
                starts_at: quote.starts_at,
                ends_at: quote.ends_at,
                coverage_amount: quote.coverage_amount,
                premium_amount: quote.premium,
                promo_code: quote.promo_code,
            })
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "policies: activation failed");
                PolicyError::Internal(err)
            })?;

        match outcome {
            ActivationOutcome::Activated {
                policy,
                balance_after,
            } => {
                info!(
                    %user_id,
                    policy_id = %policy.id,
                    policy_number = policy.policy_number,
                    premium = policy.premium_amount,
                    "policies: policy activated"
                );
                Ok(ActivatedPolicyDto {
                    policy: PolicyDto::from_entity(policy, now),
                    balance: balance_after,
                })
            }
            ActivationOutcome::InsufficientBalance { balance } => {
                warn!(
                    %user_id,
                    balance,
                    premium = quote.premium,
                    "policies: balance does not cover premium"
                );
                Err(PolicyError::InsufficientBalance)
            }
        }
    }

    pub async fn list(&self, user_id: Uuid) -> UseCaseResult<Vec<PolicyDto>> {
        let policies = self
            .policy_repository
            .list_by_user(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "policies: failed to list policies");
                PolicyError::Internal(err)
            })?;

        let now = Utc::now();
        Ok(policies
            .into_iter()
            .map(|policy| PolicyDto::from_entity(policy, now))
            .collect())
    }

    pub async fn get(&self, user_id: Uuid, policy_id: Uuid) -> UseCaseResult<PolicyDto> {
        let policy = self
            .policy_repository
            .find_for_user(policy_id, user_id)
            .await
            .map_err(|err| {
                error!(%user_id, %policy_id, db_error = ?err, "policies: failed to load policy");
                PolicyError::Internal(err)
            })?
            .ok_or(PolicyError::NotFound)?;

        Ok(PolicyDto::from_entity(policy, Utc::now()))
    }

    pub async fn claim(&self, user_id: Uuid, policy_id: Uuid) -> UseCaseResult<PolicyDto> {
        let now = Utc::now();
        let policy = self
            .policy_repository
            .find_for_user(policy_id, user_id)
            .await
            .map_err(|err| {
                error!(%user_id, %policy_id, db_error = ?err, "policies: failed to load policy");
                PolicyError::Internal(err)
            })?
            .ok_or(PolicyError::NotFound)?;

        if !policy_lifecycle::is_claimable(now, policy.starts_at, policy.ends_at, policy.claimed) {
            warn!(%user_id, %policy_id, "policies: claim outside eligibility");
            return Err(PolicyError::NotClaimable);
        }

        let claimed = self
            .policy_repository
            .mark_claimed(policy_id, user_id, now)
            .await
            .map_err(|err| {
                error!(%user_id, %policy_id, db_error = ?err, "policies: failed to record claim");
                PolicyError::Internal(err)
            })?
            .ok_or(PolicyError::NotClaimable)?;

        info!(%user_id, %policy_id, "policies: claim recorded");
        Ok(PolicyDto::from_entity(claimed, now))
    }
}
