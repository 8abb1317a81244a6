pub mod pin_hash;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

use crate::{
    axum_http::error_responses::json_error,
    config::{config_loader, config_model::UserSecret},
};

pub const TOKEN_ISSUER: &str = "acgura";

#[derive(Debug, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub iss: String,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
}

#[derive(Debug)]
pub struct AuthError(anyhow::Error);

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError(err)
    }
}

impl axum::response::IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        warn!(error = %self.0, "auth: request rejected");
        json_error(
            StatusCode::UNAUTHORIZED,
            "Sesión inválida o expirada. Por favor, inicia sesión nuevamente.".to_string(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub fn issue_user_jwt(
    user_id: Uuid,
    user_secret: &UserSecret,
    now: DateTime<Utc>,
) -> anyhow::Result<IssuedToken> {
    let expires_at = now + Duration::seconds(user_secret.ttl_seconds);
    let claims = UserClaims {
        sub: user_id.to_string(),
        iss: TOKEN_ISSUER.to_string(),
        iat: now.timestamp().max(0) as usize,
        exp: expires_at.timestamp().max(0) as usize,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(user_secret.secret.as_bytes()),
    )?;

    Ok(IssuedToken { token, expires_at })
}

pub fn validate_user_jwt(token: &str, secret: &str) -> Result<UserClaims, AuthError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[TOKEN_ISSUER]);

    let token_data = decode::<UserClaims>(token, &decoding_key, &validation)
        .map_err(|e| anyhow::anyhow!("JWT validation failed: {}", e))?;

    Ok(token_data.claims)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|e| anyhow::anyhow!("Missing or invalid Authorization header: {}", e))?;

        let user_secret = config_loader::get_user_secret().map_err(|err| {
            error!(config_error = ?err, "auth: failed to load JWT secret");
            err
        })?;

        let claims = validate_user_jwt(bearer.token(), &user_secret.secret)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| anyhow::anyhow!("Invalid user ID in token"))?;

        Ok(AuthUser { user_id })
    }
}
