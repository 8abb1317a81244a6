use std::time::Duration;

use anyhow::Result;
use diesel::{
    PgConnection,
    r2d2::{ConnectionManager, Pool},
};

pub type PgPoolSquad = Pool<ConnectionManager<PgConnection>>;

const CONNECTION_TIMEOUT_SECS: u64 = 10;

pub fn establish_connection(database_url: &str, max_size: u32) -> Result<PgPoolSquad> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(max_size)
        .connection_timeout(Duration::from_secs(CONNECTION_TIMEOUT_SECS))
        .test_on_check_out(true)
        .build(manager)?;
    Ok(pool)
}
