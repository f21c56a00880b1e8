use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use clerk_core::{
    AccountFailureRepository, ClerkResult, DatabaseConfig, JobRepository, UserRepository,
};
use clerk_dispatcher::StandardJobRegistry;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::schema::{ensure_account_tables, run_migrations};
use super::sqlite::{SqliteAccountFailureRepository, SqliteJobRepository, SqliteUserRepository};

/// SQLite连接池和仓储的统一入口
pub struct DatabaseManager {
    pool: SqlitePool,
}

impl DatabaseManager {
    /// 根据配置创建连接池
    pub async fn new(config: &DatabaseConfig) -> ClerkResult<Self> {
        let mut connect_options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        if !config.url.contains(":memory:") {
            connect_options = connect_options.journal_mode(SqliteJournalMode::Wal);
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_with(connect_options)
            .await?;

        info!("数据库连接池创建完成: {}", config.url);
        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// 创建引擎自己的表，以及标准任务注册表中每个账户类型的失败状态表
    pub async fn migrate(&self, registry: &StandardJobRegistry) -> ClerkResult<()> {
        run_migrations(&self.pool).await?;
        ensure_account_tables(&self.pool, registry).await
    }

    pub async fn health_check(&self) -> ClerkResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        debug!("数据库健康检查通过");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await
    }

    pub fn account_failure_repository(&self) -> Arc<dyn AccountFailureRepository> {
        Arc::new(SqliteAccountFailureRepository::new(self.pool.clone()))
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        Arc::new(SqliteUserRepository::new(self.pool.clone()))
    }

    pub fn job_repository(&self) -> Arc<dyn JobRepository> {
        Arc::new(SqliteJobRepository::new(self.pool.clone()))
    }
}
