use crate::auth::{
    jwt::JwtKeys,
    password::Argon2Hasher,
    repo::{CredentialStore, MemoryCredentialStore, PgCredentialStore},
    services::AuthService,
};
use crate::config::AppConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = crate::db::connect(&config).await?;
        crate::db::migrate(&db).await?;

        let store = Arc::new(PgCredentialStore::new(db)) as Arc<dyn CredentialStore>;
        Self::from_parts(config, store)
    }

    /// Wire the service over any credential store.
    pub fn from_parts(
        config: Arc<AppConfig>,
        store: Arc<dyn CredentialStore>,
    ) -> anyhow::Result<Self> {
        let keys = JwtKeys::from(&config.jwt);
        let auth = AuthService::new(store, Arc::new(Argon2Hasher::new()), Arc::new(keys))?;
        Ok(Self {
            config,
            auth: Arc::new(auth),
        })
    }

    pub fn in_memory(config: AppConfig) -> anyhow::Result<Self> {
        Self::from_parts(Arc::new(config), Arc::new(MemoryCredentialStore::new()))
    }
}
