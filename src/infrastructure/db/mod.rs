use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::domain::audit::AuditStoreError;
use crate::infrastructure::config::DatabaseConfig;

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await
}

pub async fn check_connection(pool: &DbPool) -> Result<bool, sqlx::Error> {
    sqlx::query("SELECT 1").fetch_one(pool).await.map(|_| true)
}

#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseState {
    Disabled,
    Uninitialized,
    Connected,
    Failed(String),
}

/// Process-wide handle to the audit database.
///
/// The connection is attempted on first use. Whatever that attempt yields is
/// kept for the life of the handle: a failed attempt is never retried and
/// every later call reports the store as unavailable.
pub struct AuditDatabase {
    settings: Option<ConnectSettings>,
    pool: OnceCell<Result<DbPool, String>>,
}

struct ConnectSettings {
    url: String,
    run_migrations: bool,
}

impl AuditDatabase {
    pub fn new(config: &DatabaseConfig) -> Self {
        if !config.enabled {
            return Self::disabled();
        }
        Self {
            settings: Some(ConnectSettings {
                url: config.connection_url(),
                run_migrations: config.run_migrations,
            }),
            pool: OnceCell::new(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            settings: None,
            pool: OnceCell::new(),
        }
    }

    /// Wrap an already connected pool.
    pub fn from_pool(pool: DbPool) -> Self {
        Self {
            settings: None,
            pool: OnceCell::new_with(Some(Ok(pool))),
        }
    }

    pub fn state(&self) -> DatabaseState {
        match self.pool.get() {
            Some(Ok(_)) => DatabaseState::Connected,
            Some(Err(reason)) => DatabaseState::Failed(reason.clone()),
            None if self.settings.is_none() => DatabaseState::Disabled,
            None => DatabaseState::Uninitialized,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state() != DatabaseState::Disabled
    }

    pub async fn pool(&self) -> Result<&DbPool, AuditStoreError> {
        let settings = match (&self.settings, self.pool.get()) {
            (_, Some(initialized)) => return Self::as_store_result(initialized),
            (None, None) => {
                return Err(AuditStoreError::Unavailable(
                    "audit logging is disabled".to_string(),
                ))
            }
            (Some(settings), None) => settings,
        };

        let initialized = self
            .pool
            .get_or_init(|| async {
                match Self::connect(settings).await {
                    Ok(pool) => {
                        tracing::info!("Audit database connection established");
                        Ok(pool)
                    }
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            "Audit database not available, continuing without audit logging"
                        );
                        Err(e.to_string())
                    }
                }
            })
            .await;

        Self::as_store_result(initialized)
    }

    async fn connect(settings: &ConnectSettings) -> anyhow::Result<DbPool> {
        let pool = create_pool(&settings.url).await?;
        check_connection(&pool).await?;
        if settings.run_migrations {
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Audit database migrations applied");
        }
        Ok(pool)
    }

    fn as_store_result(initialized: &Result<DbPool, String>) -> Result<&DbPool, AuditStoreError> {
        initialized
            .as_ref()
            .map_err(|reason| AuditStoreError::Unavailable(reason.clone()))
    }
}
