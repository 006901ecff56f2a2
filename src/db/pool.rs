use super::{Db, DbResult};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use std::str::FromStr;
use tokio_postgres::NoTls;

impl Db {
    /// Opens a lazily connecting pool of at most `max_size` connections to `url`.
    pub fn new(url: &str, max_size: usize) -> DbResult<Self> {
        let pg = tokio_postgres::Config::from_str(url)?;

        // Connections are checked with a test query before reuse
        let mgr = Manager::from_config(
            pg,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Verified,
            },
        );

        let pool = Pool::builder(mgr).max_size(max_size).runtime(Runtime::Tokio1).build()?;
        tracing::debug!(max_size, "user store pool ready");

        Ok(Self { pool })
    }
}
