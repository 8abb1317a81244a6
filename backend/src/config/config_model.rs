#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub backend_server: BackendServer,
    pub database: Database,
    pub user_secret: UserSecret,
    pub pin_reset: PinReset,
}

#[derive(Debug, Clone)]
pub struct BackendServer {
    pub port: u16,
    /// MiB.
    pub body_limit: u64,
    /// Seconds.
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct UserSecret {
    pub secret: String,
    pub ttl_seconds: i64,
}

#[derive(Debug, Clone)]
pub struct PinReset {
    pub base_url: String,
    pub ttl_minutes: i64,
}
