use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use crates::domain::{
    entities::users::{InsertUserEntity, UpdateUserProfileEntity},
    repositories::users::UserRepository,
    value_objects::{
        accounts::{
            self, AccessTokenDto, ChangePinModel, ContactField, DuplicateContact, LoginModel,
            RegisterUserModel, UpdateProfileModel, UserProfileDto,
        },
        enums::user_statuses::UserStatus,
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    auth::{self, pin_hash},
    axum_http::error_responses::UseCaseError,
    config::config_model::UserSecret,
};

pub const INITIAL_BALANCE: i64 = 0;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Por favor completa todos los campos")]
    MissingFields,
    #[error("Por favor ingresa un correo electrónico válido")]
    InvalidEmail,
    #[error("El número de celular solo debe contener números")]
    InvalidPhone,
    #[error("El PIN debe tener 4 dígitos")]
    InvalidPin,
    #[error("Los PINs no coinciden")]
    PinMismatch,
    #[error("{}", already_registered_message(.0))]
    AlreadyRegistered(ContactField),
    #[error("Usuario no encontrado. Por favor, verifica tus datos o regístrate.")]
    UserNotFound,
    #[error("PIN incorrecto. Por favor, intenta de nuevo.")]
    WrongPin,
    #[error("La cuenta está bloqueada")]
    Blocked,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

fn already_registered_message(field: &ContactField) -> &'static str {
    match field {
        ContactField::DocumentNumber => {
            "Ya existe un usuario registrado con este número de documento"
        }
        ContactField::Email => "Ya existe un usuario registrado con este correo electrónico",
        ContactField::Phone => "Ya existe un usuario registrado con este número de celular",
    }
}

impl UseCaseError for AccountError {
    fn status_code(&self) -> StatusCode {
        match self {
            AccountError::MissingFields
            | AccountError::InvalidEmail
            | AccountError::InvalidPhone
            | AccountError::InvalidPin
            | AccountError::PinMismatch => StatusCode::BAD_REQUEST,
            AccountError::AlreadyRegistered(_) => StatusCode::CONFLICT,
            AccountError::UserNotFound => StatusCode::NOT_FOUND,
            AccountError::WrongPin => StatusCode::UNAUTHORIZED,
            AccountError::Blocked => StatusCode::FORBIDDEN,
            AccountError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, AccountError>;

/// Contact data after trimming, ready to validate and store.
struct ContactData {
    full_name: String,
    document_number: String,
    email: String,
    phone: String,
}

impl ContactData {
    fn normalize(full_name: &str, document_number: &str, email: &str, phone: &str) -> Self {
        Self {
            full_name: full_name.trim().to_string(),
            document_number: document_number.trim().to_string(),
            email: email.trim().to_lowercase(),
            phone: phone.trim().to_string(),
        }
    }

    fn validate_format(&self) -> UseCaseResult<()> {
        if self.full_name.is_empty()
            || self.document_number.is_empty()
            || self.email.is_empty()
            || self.phone.is_empty()
        {
            return Err(AccountError::MissingFields);
        }
        if !accounts::is_valid_email(&self.email) {
            return Err(AccountError::InvalidEmail);
        }
        if !accounts::is_valid_phone(&self.phone) {
            return Err(AccountError::InvalidPhone);
        }
        Ok(())
    }
}

/// A write that lost a uniqueness race still reports the taken field.
fn write_error(err: anyhow::Error, context: &'static str) -> AccountError {
    match err.downcast_ref::<DuplicateContact>().copied() {
        Some(DuplicateContact(field)) => {
            warn!(?field, "accounts: contact field taken by a concurrent write");
            AccountError::AlreadyRegistered(field)
        }
        None => {
            error!(db_error = ?err, "{context}");
            AccountError::Internal(err)
        }
    }
}

pub struct AccountsUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    user_repository: Arc<U>,
    user_secret: UserSecret,
}

impl<U> AccountsUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(user_repository: Arc<U>, user_secret: UserSecret) -> Self {
        Self {
            user_repository,
            user_secret,
        }
    }

    pub async fn register(&self, model: RegisterUserModel) -> UseCaseResult<UserProfileDto> {
        let contact = ContactData::normalize(
            &model.full_name,
            &model.document_number,
            &model.email,
            &model.phone,
        );
        info!(
            document_type = %model.document_type,
            "accounts: registration requested"
        );

        contact.validate_format()?;
        validate_new_pin(&model.pin, &model.confirm_pin)?;
        self.ensure_contact_available(&contact, None).await?;

        let pin_hash = pin_hash::hash_pin(&model.pin)?;

        let user = self
            .user_repository
            .register(InsertUserEntity {
                full_name: contact.full_name,
                document_type: model.document_type.to_string(),
                document_number: contact.document_number,
                email: contact.email,
                phone: contact.phone,
                pin_hash,
                balance: INITIAL_BALANCE,
                status: UserStatus::Active.to_string(),
            })
            .await
            .map_err(|err| write_error(err, "accounts: failed to insert user"))?;

        info!(user_id = %user.id, "accounts: user registered");
        Ok(UserProfileDto::from(user))
    }

    pub async fn login(&self, model: LoginModel) -> UseCaseResult<AccessTokenDto> {
        let document_number = model.document_number.trim();
        if document_number.is_empty() || model.pin.is_empty() {
            return Err(AccountError::MissingFields);
        }

        let user = self
            .user_repository
            .find_by_document(&model.document_type.to_string(), document_number)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "accounts: failed to look up user by document");
                AccountError::Internal(err)
            })?
            .ok_or_else(|| {
                info!(
                    document_type = %model.document_type,
                    "accounts: login for unknown document"
                );
                AccountError::UserNotFound
            })?;

        if UserStatus::from_str(&user.status) != UserStatus::Active {
            warn!(user_id = %user.id, "accounts: login attempt on blocked account");
            return Err(AccountError::Blocked);
        }

        if !pin_hash::verify_pin(&model.pin, &user.pin_hash) {
            warn!(user_id = %user.id, "accounts: wrong PIN");
            return Err(AccountError::WrongPin);
        }

        let issued = auth::issue_user_jwt(user.id, &self.user_secret, Utc::now())?;

        info!(user_id = %user.id, "accounts: login succeeded");
        Ok(AccessTokenDto {
            access_token: issued.token,
            token_type: "Bearer".to_string(),
            expires_at: issued.expires_at,
            user: UserProfileDto::from(user),
        })
    }

    pub async fn get_profile(&self, user_id: Uuid) -> UseCaseResult<UserProfileDto> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "accounts: failed to load user");
                AccountError::Internal(err)
            })?
            .ok_or(AccountError::UserNotFound)?;

        Ok(UserProfileDto::from(user))
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        model: UpdateProfileModel,
    ) -> UseCaseResult<UserProfileDto> {
        info!(%user_id, "accounts: profile update requested");
        let contact = ContactData::normalize(
            &model.full_name,
            &model.document_number,
            &model.email,
            &model.phone,
        );

        contact.validate_format()?;
        self.ensure_contact_available(&contact, Some(user_id)).await?;

        let user = self
            .user_repository
            .update_profile(
                user_id,
                UpdateUserProfileEntity {
                    full_name: contact.full_name,
                    document_type: model.document_type.to_string(),
                    document_number: contact.document_number,
                    email: contact.email,
                    phone: contact.phone,
                    updated_at: Utc::now(),
                },
            )
            .await
            .map_err(|err| write_error(err, "accounts: failed to update profile"))?;

        Ok(UserProfileDto::from(user))
    }

    pub async fn change_pin(&self, user_id: Uuid, model: ChangePinModel) -> UseCaseResult<()> {
        validate_new_pin(&model.new_pin, &model.confirm_pin)?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "accounts: failed to load user");
                AccountError::Internal(err)
            })?
            .ok_or(AccountError::UserNotFound)?;

        if !pin_hash::verify_pin(&model.current_pin, &user.pin_hash) {
            warn!(%user_id, "accounts: wrong current PIN on PIN change");
            return Err(AccountError::WrongPin);
        }

        let pin_hash = pin_hash::hash_pin(&model.new_pin)?;
        self.user_repository
            .update_pin_hash(user_id, pin_hash)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "accounts: failed to store new PIN");
                AccountError::Internal(err)
            })?;

        info!(%user_id, "accounts: PIN changed");
        Ok(())
    }

    /// Uniqueness in document, email, phone order.
    async fn ensure_contact_available(
        &self,
        contact: &ContactData,
        exclude_user_id: Option<Uuid>,
    ) -> UseCaseResult<()> {
        let repo = &self.user_repository;
        let checks = [
            (
                ContactField::DocumentNumber,
                repo.document_number_taken(&contact.document_number, exclude_user_id)
                    .await,
            ),
            (
                ContactField::Email,
                repo.email_taken(&contact.email, exclude_user_id).await,
            ),
            (
                ContactField::Phone,
                repo.phone_taken(&contact.phone, exclude_user_id).await,
            ),
        ];

        for (field, taken) in checks {
            let taken = taken.map_err(|err| {
                error!(?field, db_error = ?err, "accounts: failed to check uniqueness");
                AccountError::Internal(err)
            })?;
            if taken {
                warn!(?field, "accounts: contact field already registered");
                return Err(AccountError::AlreadyRegistered(field));
            }
        }

        Ok(())
    }
}

pub(crate) fn validate_new_pin(pin: &str, confirm_pin: &str) -> UseCaseResult<()> {
    if pin.is_empty() || confirm_pin.is_empty() {
        return Err(AccountError::MissingFields);
    }
    if pin != confirm_pin {
        return Err(AccountError::PinMismatch);
    }
    if !accounts::is_valid_pin(pin) {
        return Err(AccountError::InvalidPin);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crates::domain::{
        entities::users::UserEntity, repositories::users::MockUserRepository,
        value_objects::enums::document_types::DocumentType,
    };
    use mockall::predicate::eq;

    fn user_secret() -> UserSecret {
        UserSecret {
            secret: "accounts-test-secret".to_string(),
            ttl_seconds: 600,
        }
    }

    fn sample_user(pin: &str) -> UserEntity {
        let now = Utc::now();
        UserEntity {
            id: Uuid::new_v4(),
            full_name: "Ana María Restrepo".to_string(),
            document_type: DocumentType::Cedula.to_string(),
            document_number: "1020304050".to_string(),
            email: "ana@acgura.co".to_string(),
            phone: "3001234567".to_string(),
            pin_hash: pin_hash::hash_pin(pin).unwrap(),
            balance: 20_000,
            status: UserStatus::Active.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn register_model() -> RegisterUserModel {
        RegisterUserModel {
            full_name: " Ana María Restrepo ".to_string(),
            document_type: DocumentType::Cedula,
            document_number: "1020304050".to_string(),
            email: "Ana@Acgura.co".to_string(),
            phone: "3001234567".to_string(),
            pin: "0420".to_string(),
            confirm_pin: "0420".to_string(),
        }
    }

    fn repo_with_free_contacts() -> MockUserRepository {
        let mut repo = MockUserRepository::new();
        repo.expect_document_number_taken()
            .returning(|_, _| Ok(false));
        repo.expect_email_taken().returning(|_, _| Ok(false));
        repo.expect_phone_taken().returning(|_, _| Ok(false));
        repo
    }

    #[tokio::test]
    async fn register_stores_hashed_pin_and_zero_balance() {
        let mut repo = repo_with_free_contacts();
        repo.expect_register()
            .withf(|entity| {
                entity.full_name == "Ana María Restrepo"
                    && entity.email == "ana@acgura.co"
                    && entity.balance == INITIAL_BALANCE
                    && entity.pin_hash != "0420"
                    && pin_hash::verify_pin("0420", &entity.pin_hash)
            })
            .times(1)
            .returning(|entity| {
                let now = Utc::now();
                Ok(UserEntity {
                    id: Uuid::new_v4(),
                    full_name: entity.full_name,
                    document_type: entity.document_type,
                    document_number: entity.document_number,
                    email: entity.email,
                    phone: entity.phone,
                    pin_hash: entity.pin_hash,
                    balance: entity.balance,
                    status: entity.status,
                    created_at: now,
                    updated_at: now,
                })
            });

        let usecase = AccountsUseCase::new(Arc::new(repo), user_secret());
        let profile = usecase.register(register_model()).await.unwrap();

        assert_eq!(profile.balance, 0);
        assert_eq!(profile.document_type, DocumentType::Cedula);
    }

    #[tokio::test]
    async fn register_validates_formats_before_touching_storage() {
        let usecase = AccountsUseCase::new(Arc::new(MockUserRepository::new()), user_secret());

        let mut model = register_model();
        model.email = "ana@acgura".to_string();
        assert!(matches!(
            usecase.register(model).await,
            Err(AccountError::InvalidEmail)
        ));

        let mut model = register_model();
        model.phone = "300-123".to_string();
        assert!(matches!(
            usecase.register(model).await,
            Err(AccountError::InvalidPhone)
        ));

        let mut model = register_model();
        model.full_name = "   ".to_string();
        assert!(matches!(
            usecase.register(model).await,
            Err(AccountError::MissingFields)
        ));
    }

    #[tokio::test]
    async fn register_rejects_bad_pins() {
        let usecase = AccountsUseCase::new(Arc::new(repo_with_free_contacts()), user_secret());

        let mut model = register_model();
        model.confirm_pin = "0421".to_string();
        assert!(matches!(
            usecase.register(model).await,
            Err(AccountError::PinMismatch)
        ));

        let mut model = register_model();
        model.pin = "12345".to_string();
        model.confirm_pin = "12345".to_string();
        assert!(matches!(
            usecase.register(model).await,
            Err(AccountError::InvalidPin)
        ));
    }

    #[tokio::test]
    async fn register_checks_pins_before_uniqueness() {
        let mut repo = MockUserRepository::new();
        repo.expect_document_number_taken().never();
        repo.expect_email_taken().never();
        repo.expect_phone_taken().never();
        repo.expect_register().never();

        let usecase = AccountsUseCase::new(Arc::new(repo), user_secret());
        let mut model = register_model();
        model.pin = "1234".to_string();
        model.confirm_pin = "9999".to_string();
        let err = usecase.register(model).await.unwrap_err();

        assert!(matches!(err, AccountError::PinMismatch));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_losing_a_uniqueness_race_is_a_conflict() {
        let mut repo = repo_with_free_contacts();
        repo.expect_register()
            .times(1)
            .returning(|_| Err(DuplicateContact(ContactField::Email).into()));

        let usecase = AccountsUseCase::new(Arc::new(repo), user_secret());
        let err = usecase.register(register_model()).await.unwrap_err();

        assert!(matches!(err, AccountError::AlreadyRegistered(ContactField::Email)));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn update_profile_losing_a_uniqueness_race_is_a_conflict() {
        let mut repo = repo_with_free_contacts();
        repo.expect_update_profile()
            .returning(|_, _| Err(DuplicateContact(ContactField::Phone).into()));

        let usecase = AccountsUseCase::new(Arc::new(repo), user_secret());
        let err = usecase
            .update_profile(
                Uuid::new_v4(),
                UpdateProfileModel {
                    full_name: "Ana María Restrepo".to_string(),
                    document_type: DocumentType::Cedula,
                    document_number: "1020304050".to_string(),
                    email: "ana@acgura.co".to_string(),
                    phone: "3109876543".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::AlreadyRegistered(ContactField::Phone)));
    }

    #[tokio::test]
    async fn register_reports_first_duplicate_field() {
        let mut repo = MockUserRepository::new();
        repo.expect_document_number_taken()
            .returning(|_, _| Ok(false));
        repo.expect_email_taken().returning(|_, _| Ok(true));
        repo.expect_phone_taken().returning(|_, _| Ok(true));
        repo.expect_register().never();

        let usecase = AccountsUseCase::new(Arc::new(repo), user_secret());
        let err = usecase.register(register_model()).await.unwrap_err();

        assert!(matches!(err, AccountError::AlreadyRegistered(ContactField::Email)));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            err.to_string(),
            "Ya existe un usuario registrado con este correo electrónico"
        );
    }

    #[tokio::test]
    async fn login_issues_token_for_correct_pin() {
        let user = sample_user("0420");
        let user_id = user.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_document()
            .times(1)
            .returning(move |_, _| Ok(Some(user.clone())));

        let usecase = AccountsUseCase::new(Arc::new(repo), user_secret());
        let token = usecase
            .login(LoginModel {
                document_type: DocumentType::Cedula,
                document_number: "1020304050".to_string(),
                pin: "0420".to_string(),
            })
            .await
            .unwrap();

        let claims = auth::validate_user_jwt(&token.access_token, "accounts-test-secret").unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(token.user.id, user_id);
    }

    #[tokio::test]
    async fn login_with_wrong_pin_is_unauthorized() {
        let user = sample_user("0420");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_document()
            .returning(move |_, _| Ok(Some(user.clone())));

        let usecase = AccountsUseCase::new(Arc::new(repo), user_secret());
        let err = usecase
            .login(LoginModel {
                document_type: DocumentType::Cedula,
                document_number: "1020304050".to_string(),
                pin: "9999".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::WrongPin));
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_for_unknown_document_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_document().returning(|_, _| Ok(None));

        let usecase = AccountsUseCase::new(Arc::new(repo), user_secret());
        let err = usecase
            .login(LoginModel {
                document_type: DocumentType::Pasaporte,
                document_number: "AB123".to_string(),
                pin: "0420".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::UserNotFound));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn login_on_blocked_account_is_forbidden() {
        let mut user = sample_user("0420");
        user.status = UserStatus::Blocked.to_string();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_document()
            .returning(move |_, _| Ok(Some(user.clone())));

        let usecase = AccountsUseCase::new(Arc::new(repo), user_secret());
        let err = usecase
            .login(LoginModel {
                document_type: DocumentType::Cedula,
                document_number: "1020304050".to_string(),
                pin: "0420".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::Blocked));
    }

    #[tokio::test]
    async fn update_profile_excludes_own_row_from_uniqueness() {
        let user = sample_user("0420");
        let user_id = user.id;

        let mut repo = MockUserRepository::new();
        repo.expect_document_number_taken()
            .withf(move |_, exclude| *exclude == Some(user_id))
            .returning(|_, _| Ok(false));
        repo.expect_email_taken()
            .withf(move |_, exclude| *exclude == Some(user_id))
            .returning(|_, _| Ok(false));
        repo.expect_phone_taken()
            .withf(move |_, exclude| *exclude == Some(user_id))
            .returning(|_, _| Ok(false));
        repo.expect_update_profile()
            .with(eq(user_id), mockall::predicate::always())
            .returning(move |_, entity| {
                let mut updated = user.clone();
                updated.full_name = entity.full_name;
                updated.phone = entity.phone;
                Ok(updated)
            });

        let usecase = AccountsUseCase::new(Arc::new(repo), user_secret());
        let profile = usecase
            .update_profile(
                user_id,
                UpdateProfileModel {
                    full_name: "Ana M. Restrepo".to_string(),
                    document_type: DocumentType::Cedula,
                    document_number: "1020304050".to_string(),
                    email: "ana@acgura.co".to_string(),
                    phone: "3109876543".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(profile.full_name, "Ana M. Restrepo");
        assert_eq!(profile.phone, "3109876543");
    }

    #[tokio::test]
    async fn change_pin_requires_current_pin() {
        let user = sample_user("0420");
        let user_id = user.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(user_id))
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_update_pin_hash().never();

        let usecase = AccountsUseCase::new(Arc::new(repo), user_secret());
        let err = usecase
            .change_pin(
                user_id,
                ChangePinModel {
                    current_pin: "1111".to_string(),
                    new_pin: "2222".to_string(),
                    confirm_pin: "2222".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::WrongPin));
    }

    #[tokio::test]
    async fn change_pin_stores_new_hash() {
        let user = sample_user("0420");
        let user_id = user.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_update_pin_hash()
            .withf(move |id, hash| *id == user_id && pin_hash::verify_pin("2222", hash))
            .times(1)
            .returning(|_, _| Ok(()));

        let usecase = AccountsUseCase::new(Arc::new(repo), user_secret());
        usecase
            .change_pin(
                user_id,
                ChangePinModel {
                    current_pin: "0420".to_string(),
                    new_pin: "2222".to_string(),
                    confirm_pin: "2222".to_string(),
                },
            )
            .await
            .unwrap();
    }
}
