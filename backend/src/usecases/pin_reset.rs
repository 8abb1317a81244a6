use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use crates::domain::{
    entities::pin_reset_tokens::InsertPinResetTokenEntity,
    repositories::{pin_reset_tokens::PinResetTokenRepository, users::UserRepository},
    value_objects::accounts::{self, PinResetConfirmModel, PinResetRequestModel},
};
use rand::RngCore;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    auth::pin_hash,
    axum_http::error_responses::UseCaseError,
    config::{config_model::PinReset, stage::Stage},
    usecases::accounts::{self as account_usecase, AccountError},
};

pub const RESEND_COOLDOWN_SECONDS: i64 = 60;
const TOKEN_BYTES: usize = 32;

#[derive(Debug, Error)]
pub enum PinResetError {
    #[error("Por favor ingresa un correo electrónico válido")]
    InvalidEmail,
    #[error("No existe una cuenta con este correo electrónico")]
    AccountNotFound,
    #[error("Demasiados intentos. Por favor, intenta más tarde")]
    TooManyRequests,
    #[error("El enlace de recuperación no es válido o ha expirado")]
    InvalidToken,
    #[error(transparent)]
    Pin(AccountError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl UseCaseError for PinResetError {
    fn status_code(&self) -> StatusCode {
        match self {
            PinResetError::InvalidEmail | PinResetError::InvalidToken => StatusCode::BAD_REQUEST,
            PinResetError::AccountNotFound => StatusCode::NOT_FOUND,
            PinResetError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            PinResetError::Pin(err) => err.status_code(),
            PinResetError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, PinResetError>;

/// Delivers the reset link to the account holder.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PinResetMailer {
    async fn send_reset_link(&self, email: &str, full_name: &str, link: &str) -> anyhow::Result<()>;
}

/// No outbound mail provider is wired; the link is written to the log outside production.
pub struct LogPinResetMailer {
    stage: Stage,
}

impl LogPinResetMailer {
    pub fn new(stage: Stage) -> Self {
        Self { stage }
    }
}

#[async_trait]
impl PinResetMailer for LogPinResetMailer {
    async fn send_reset_link(&self, email: &str, full_name: &str, link: &str) -> anyhow::Result<()> {
        match self.stage {
            Stage::Production => info!(%email, "pin_reset: reset link issued"),
            _ => info!(%email, %full_name, %link, "pin_reset: reset link issued"),
        }
        Ok(())
    }
}

pub struct PinResetUseCase<U, T, M>
where
    U: UserRepository + Send + Sync + 'static,
    T: PinResetTokenRepository + Send + Sync + 'static,
    M: PinResetMailer + Send + Sync + 'static,
{
    user_repository: Arc<U>,
    token_repository: Arc<T>,
    mailer: Arc<M>,
    config: PinReset,
}

impl<U, T, M> PinResetUseCase<U, T, M>
where
    U: UserRepository + Send + Sync + 'static,
    T: PinResetTokenRepository + Send + Sync + 'static,
    M: PinResetMailer + Send + Sync + 'static,
{
    pub fn new(
        user_repository: Arc<U>,
        token_repository: Arc<T>,
        mailer: Arc<M>,
        config: PinReset,
    ) -> Self {
        Self {
            user_repository,
            token_repository,
            mailer,
            config,
        }
    }

    pub async fn request(&self, model: PinResetRequestModel) -> UseCaseResult<()> {
        self.request_at(model, Utc::now()).await
    }

    pub async fn request_at(
        &self,
        model: PinResetRequestModel,
        now: DateTime<Utc>,
    ) -> UseCaseResult<()> {
        let email = model.email.trim().to_lowercase();
        if !accounts::is_valid_email(&email) {
            return Err(PinResetError::InvalidEmail);
        }

        let user = self
            .user_repository
            .find_by_email(&email)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "pin_reset: failed to look up user by email");
                PinResetError::Internal(err)
            })?
            .ok_or(PinResetError::AccountNotFound)?;
        let user_id = user.id;

        let latest = self
            .token_repository
            .latest_issued_at(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "pin_reset: failed to load latest token");
                PinResetError::Internal(err)
            })?;
        if let Some(issued_at) = latest {
            if now - issued_at < Duration::seconds(RESEND_COOLDOWN_SECONDS) {
                warn!(%user_id, "pin_reset: request inside cooldown");
                return Err(PinResetError::TooManyRequests);
            }
        }

        let token = generate_reset_token();
        self.token_repository
            .create(InsertPinResetTokenEntity {
                user_id,
                token_hash: hash_reset_token(&token),
                expires_at: now + Duration::minutes(self.config.ttl_minutes),
            })
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "pin_reset: failed to store token");
                PinResetError::Internal(err)
            })?;

        let link = reset_link(&self.config.base_url, &token);
        self.mailer
            .send_reset_link(&user.email, &user.full_name, &link)
            .await
            .map_err(|err| {
                error!(%user_id, error = ?err, "pin_reset: failed to deliver reset link");
                PinResetError::Internal(err)
            })?;

        info!(%user_id, "pin_reset: token issued");
        Ok(())
    }

    pub async fn confirm(&self, model: PinResetConfirmModel) -> UseCaseResult<()> {
        let token = model.token.trim();
        if token.is_empty() {
            return Err(PinResetError::InvalidToken);
        }
        account_usecase::validate_new_pin(&model.new_pin, &model.confirm_pin)
            .map_err(PinResetError::Pin)?;

        let now = Utc::now();
        let stored = self
            .token_repository
            .find_usable(&hash_reset_token(token), now)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "pin_reset: failed to look up token");
                PinResetError::Internal(err)
            })?
            .ok_or(PinResetError::InvalidToken)?;

        let pin_hash = pin_hash::hash_pin(&model.new_pin)?;
        let consumed = self
            .token_repository
            .consume(stored.id, stored.user_id, pin_hash, now)
            .await
            .map_err(|err| {
                error!(user_id = %stored.user_id, db_error = ?err, "pin_reset: failed to consume token");
                PinResetError::Internal(err)
            })?;

        if !consumed {
            warn!(user_id = %stored.user_id, "pin_reset: token consumed concurrently");
            return Err(PinResetError::InvalidToken);
        }

        info!(user_id = %stored.user_id, "pin_reset: PIN replaced");
        Ok(())
    }
}

pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Only this digest is stored.
pub fn hash_reset_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

fn reset_link(base_url: &str, token: &str) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{separator}token={token}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates::domain::{
        entities::{pin_reset_tokens::PinResetTokenEntity, users::UserEntity},
        repositories::{
            pin_reset_tokens::MockPinResetTokenRepository, users::MockUserRepository,
        },
    };
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn config() -> PinReset {
        PinReset {
            base_url: "https://acgura.co/recuperar-pin".to_string(),
            ttl_minutes: 30,
        }
    }

    fn sample_user() -> UserEntity {
        let now = Utc::now();
        UserEntity {
            id: Uuid::new_v4(),
            full_name: "Ana María Restrepo".to_string(),
            document_type: "cedula".to_string(),
            document_number: "1020304050".to_string(),
            email: "ana@acgura.co".to_string(),
            phone: "3001234567".to_string(),
            pin_hash: "hash".to_string(),
            balance: 0,
            status: "active".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn tokens_are_url_safe_and_unique() {
        let first = generate_reset_token();
        let second = generate_reset_token();

        assert_ne!(first, second);
        assert!(
            first
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_eq!(hash_reset_token(&first).len(), 64);
        assert_eq!(hash_reset_token(&first), hash_reset_token(&first));
    }

    #[test]
    fn reset_link_appends_token_query() {
        assert_eq!(
            reset_link("https://acgura.co/recuperar", "abc"),
            "https://acgura.co/recuperar?token=abc"
        );
        assert_eq!(
            reset_link("https://acgura.co/r?lang=es", "abc"),
            "https://acgura.co/r?lang=es&token=abc"
        );
    }

    #[tokio::test]
    async fn request_stores_digest_and_sends_link() {
        let user = sample_user();
        let user_id = user.id;
        let now = Utc::now();

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let mut tokens = MockPinResetTokenRepository::new();
        tokens
            .expect_latest_issued_at()
            .with(eq(user_id))
            .returning(move |_| Ok(Some(now - Duration::minutes(5))));
        tokens
            .expect_create()
            .withf(move |entity| {
                entity.user_id == user_id
                    && entity.token_hash.len() == 64
                    && entity.expires_at == now + Duration::minutes(30)
            })
            .times(1)
            .returning(|_| Ok(Uuid::new_v4()));

        let mut mailer = MockPinResetMailer::new();
        mailer
            .expect_send_reset_link()
            .withf(|email, _, link| {
                email == "ana@acgura.co"
                    && link.starts_with("https://acgura.co/recuperar-pin?token=")
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let usecase =
            PinResetUseCase::new(Arc::new(users), Arc::new(tokens), Arc::new(mailer), config());
        usecase
            .request_at(
                PinResetRequestModel {
                    email: " Ana@Acgura.co ".to_string(),
                },
                now,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn request_inside_cooldown_is_throttled() {
        let user = sample_user();
        let now = Utc::now();

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let mut tokens = MockPinResetTokenRepository::new();
        tokens
            .expect_latest_issued_at()
            .returning(move |_| Ok(Some(now - Duration::seconds(20))));
        tokens.expect_create().never();

        let usecase = PinResetUseCase::new(
            Arc::new(users),
            Arc::new(tokens),
            Arc::new(MockPinResetMailer::new()),
            config(),
        );
        let err = usecase
            .request_at(
                PinResetRequestModel {
                    email: "ana@acgura.co".to_string(),
                },
                now,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, PinResetError::TooManyRequests));
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn request_for_unknown_email_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let usecase = PinResetUseCase::new(
            Arc::new(users),
            Arc::new(MockPinResetTokenRepository::new()),
            Arc::new(MockPinResetMailer::new()),
            config(),
        );
        let err = usecase
            .request(PinResetRequestModel {
                email: "nadie@acgura.co".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PinResetError::AccountNotFound));
    }

    #[tokio::test]
    async fn confirm_replaces_pin_with_valid_token() {
        let token = generate_reset_token();
        let digest = hash_reset_token(&token);
        let token_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut tokens = MockPinResetTokenRepository::new();
        tokens
            .expect_find_usable()
            .withf(move |hash, _| hash == digest)
            .returning(move |hash, now| {
                Ok(Some(PinResetTokenEntity {
                    id: token_id,
                    user_id,
                    token_hash: hash.to_string(),
                    expires_at: now + Duration::minutes(10),
                    used_at: None,
                    created_at: now - Duration::minutes(20),
                }))
            });
        tokens
            .expect_consume()
            .withf(move |id, owner, hash, _| {
                *id == token_id && *owner == user_id && pin_hash::verify_pin("7788", hash)
            })
            .times(1)
            .returning(|_, _, _, _| Ok(true));

        let usecase = PinResetUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(tokens),
            Arc::new(MockPinResetMailer::new()),
            config(),
        );
        usecase
            .confirm(PinResetConfirmModel {
                token,
                new_pin: "7788".to_string(),
                confirm_pin: "7788".to_string(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn confirm_with_unknown_token_is_rejected() {
        let mut tokens = MockPinResetTokenRepository::new();
        tokens.expect_find_usable().returning(|_, _| Ok(None));
        tokens.expect_consume().never();

        let usecase = PinResetUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(tokens),
            Arc::new(MockPinResetMailer::new()),
            config(),
        );
        let err = usecase
            .confirm(PinResetConfirmModel {
                token: "expired".to_string(),
                new_pin: "7788".to_string(),
                confirm_pin: "7788".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PinResetError::InvalidToken));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn confirm_checks_pin_before_token() {
        let usecase = PinResetUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockPinResetTokenRepository::new()),
            Arc::new(MockPinResetMailer::new()),
            config(),
        );
        let err = usecase
            .confirm(PinResetConfirmModel {
                token: "anything".to_string(),
                new_pin: "7788".to_string(),
                confirm_pin: "7789".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Los PINs no coinciden");
    }
}
