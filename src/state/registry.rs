use crate::config::{Config, StorageKind};
use crate::db::Db;
use crate::db::repo::{MemoryUserRepository, UserRepo, UserRepository};
use crate::error::InfraResult;
use crate::services::AuthService;
use std::sync::Arc;

pub struct Repos {
    pub user: Arc<dyn UserRepo>,
}

pub struct Services {
    pub auth: Arc<AuthService>,
}

pub struct Registry {
    pub repos: Arc<Repos>,
    pub services: Arc<Services>,
    pub config: Arc<Config>,
}

impl Registry {
    pub fn new(config: Arc<Config>, user_repo: Arc<dyn UserRepo>) -> Self {
        let repos = Arc::new(Repos { user: user_repo });

        let services = Arc::new(Services {
            auth: Arc::new(AuthService::new(repos.user.clone())),
        });

        Self {
            repos,
            services,
            config,
        }
    }

    /// Sets up the configured storage backend and wires everything on top of it.
    pub async fn connect(config: Arc<Config>) -> InfraResult<Self> {
        let user_repo: Arc<dyn UserRepo> = match config.storage {
            StorageKind::Postgres => {
                let db = Arc::new(Db::new(&config.database_url, config.db_pool_size)?);
                db.init().await?;
                Arc::new(UserRepository::new(db))
            }
            StorageKind::Memory => {
                tracing::warn!("using in-memory user storage, users are lost on restart");
                Arc::new(MemoryUserRepository::new())
            }
        };

        Ok(Self::new(config, user_repo))
    }
}
