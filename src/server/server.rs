use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_mysql::*;
use crate::infra_redis::*;
use crate::logger::*;
use crate::settings::Settings;
use sqlx::{MySql, Pool};
use std::sync::Arc;

pub struct Server {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pool: Option<Pool<MySql>>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let mut pool = None;
        let user_repo: Arc<dyn UserRepo> = match settings.user.backend.as_str() {
            "memory" => Arc::new(MemoryUserRepo::new()),
            "mysql" => {
                let p = Pool::<MySql>::connect(&settings.mysql.dsn).await?;
                pool = Some(p.clone());
                Arc::new(MySqlUserRepo::new(p))
            }
            other => return Err(anyhow::anyhow!("Unknown user backend: {}", other)),
        };

        let refresh_store: Arc<dyn RefreshTokenStore> = match settings.store.backend.as_str() {
            "memory" => Arc::new(MemoryRefreshTokenStore::new()),
            "redis" => {
                let client = redis::Client::open(settings.redis.dsn.as_str())?;
                let manager = client.get_connection_manager().await?;
                Arc::new(RedisRefreshTokenStore::new(
                    manager,
                    settings.redis.prefix.clone(),
                ))
            }
            other => return Err(anyhow::anyhow!("Unknown store backend: {}", other)),
        };

        let secrets: Arc<dyn SecretProvider> = Arc::new(EnvSecretProvider::new());
        // Fail at startup rather than on the first issuance.
        secrets
            .signing_secret()
            .map_err(|_| anyhow::anyhow!("{} is not set", SECRET_KEY_VAR))?;
        let codec: Arc<dyn TokenCodec> = Arc::new(JwtHs256Codec::new(secrets));

        let auth_service: Arc<dyn AuthService> = match settings.auth.backend.as_str() {
            "fake" => Arc::new(FakeAuthService::new()),
            "real" => Arc::new(RealAuthService::new(
                user_repo.clone(),
                refresh_store,
                codec,
            )),
            other => return Err(anyhow::anyhow!("Unknown auth backend: {}", other)),
        };

        let user_service: Arc<dyn UserService> = Arc::new(RealUserService::new(user_repo));

        info!("server started");

        Ok(Self {
            auth_service,
            user_service,
            pool,
        })
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");

        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
