use anyhow::{Context, Result};

use super::{
    config_model::{BackendServer, Database, DotEnvyConfig, PinReset, UserSecret},
    stage::Stage,
};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_JWT_TTL_SECONDS: i64 = 24 * 60 * 60;
const DEFAULT_PIN_RESET_TTL_MINUTES: i64 = 30;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let backend_server = BackendServer {
        port: required("SERVER_PORT_BACKEND")?
            .parse()
            .context("SERVER_PORT_BACKEND is invalid")?,
        body_limit: required("SERVER_BODY_LIMIT")?
            .parse()
            .context("SERVER_BODY_LIMIT is invalid")?,
        timeout: required("SERVER_TIMEOUT")?
            .parse()
            .context("SERVER_TIMEOUT is invalid")?,
    };

    let database = Database {
        url: required("DATABASE_URL")?,
        max_connections: optional("DATABASE_MAX_CONNECTIONS")
            .map(|raw| raw.parse())
            .transpose()
            .context("DATABASE_MAX_CONNECTIONS is invalid")?
            .unwrap_or(DEFAULT_MAX_CONNECTIONS),
    };

    let pin_reset = PinReset {
        base_url: required("PIN_RESET_BASE_URL")?,
        ttl_minutes: optional("PIN_RESET_TTL_MINUTES")
            .map(|raw| raw.parse())
            .transpose()
            .context("PIN_RESET_TTL_MINUTES is invalid")?
            .unwrap_or(DEFAULT_PIN_RESET_TTL_MINUTES),
    };

    Ok(DotEnvyConfig {
        backend_server,
        database,
        user_secret: get_user_secret()?,
        pin_reset,
    })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or_default();
    Stage::try_from(&stage_str).unwrap_or_default()
}

pub fn get_user_secret() -> Result<UserSecret> {
    dotenvy::dotenv().ok();

    Ok(UserSecret {
        secret: required("JWT_USER_SECRET")?,
        ttl_seconds: optional("JWT_USER_TTL_SECONDS")
            .map(|raw| raw.parse())
            .transpose()
            .context("JWT_USER_TTL_SECONDS is invalid")?
            .unwrap_or(DEFAULT_JWT_TTL_SECONDS),
    })
}

fn required(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("{key} is not set"))
}

fn optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
