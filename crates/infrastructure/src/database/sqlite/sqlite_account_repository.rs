use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clerk_core::{AccountFailureRepository, AccountFailureState, ClerkResult};
use sqlx::SqlitePool;
use tracing::{debug, instrument};

/// 账户失败状态的SQLite实现
///
/// 表名由调用方从标准任务注册表取得，这里只负责加引号拼入SQL；
/// ID和时间都通过参数绑定。
pub struct SqliteAccountFailureRepository {
    pool: SqlitePool,
}

impl SqliteAccountFailureRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountFailureRepository for SqliteAccountFailureRepository {
    #[instrument(skip(self, now))]
    async fn record_failure(
        &self,
        table: &str,
        account_id: i64,
        now: DateTime<Utc>,
    ) -> ClerkResult<()> {
        let sql = format!(
            r#"UPDATE "{table}" SET failures = failures + 1, first_failure = COALESCE(first_failure, ?) WHERE id = ?"#
        );

        let result = sqlx::query(&sql)
            .bind(now)
            .bind(account_id)
            .execute(&self.pool)
            .await?;

        debug!("记录账户失败成功, 影响行数: {}", result.rows_affected());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn reset_failures(&self, table: &str, account_id: i64) -> ClerkResult<()> {
        let sql = format!(
            r#"UPDATE "{table}" SET failures = 0, first_failure = NULL WHERE id = ?"#
        );

        sqlx::query(&sql)
            .bind(account_id)
            .execute(&self.pool)
            .await?;

        debug!("重置账户失败计数成功");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn disable(&self, table: &str, account_id: i64) -> ClerkResult<()> {
        let sql = format!(r#"UPDATE "{table}" SET is_disabled = 1 WHERE id = ?"#);

        sqlx::query(&sql)
            .bind(account_id)
            .execute(&self.pool)
            .await?;

        debug!("禁用账户成功");
        Ok(())
    }

    async fn get(&self, table: &str, account_id: i64) -> ClerkResult<Option<AccountFailureState>> {
        let sql = format!(
            r#"SELECT id, user_id, title, failures, first_failure, is_disabled FROM "{table}" WHERE id = ?"#
        );

        let state = sqlx::query_as::<_, AccountFailureState>(&sql)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use clerk_dispatcher::StandardJobRegistry;
    use sqlx::sqlite::SqlitePoolOptions;

    use crate::database::schema::ensure_account_tables;

    const TABLE: &str = "accounts_bitstamp";

    async fn setup() -> (SqlitePool, SqliteAccountFailureRepository) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        ensure_account_tables(&pool, &StandardJobRegistry::builtin().unwrap())
            .await
            .unwrap();
        sqlx::query(r#"INSERT INTO accounts_bitstamp (id, user_id, title) VALUES (10, 1, 'main')"#)
            .execute(&pool)
            .await
            .unwrap();

        let repo = SqliteAccountFailureRepository::new(pool.clone());
        (pool, repo)
    }

    #[tokio::test]
    async fn test_first_failure_is_set_once() {
        let (_pool, repo) = setup().await;
        let first = Utc::now() - Duration::minutes(10);

        repo.record_failure(TABLE, 10, first).await.unwrap();
        repo.record_failure(TABLE, 10, Utc::now()).await.unwrap();

        let state = repo.get(TABLE, 10).await.unwrap().unwrap();
        assert_eq!(state.failures, 2);
        assert_eq!(
            state.first_failure.map(|t| t.timestamp()),
            Some(first.timestamp())
        );
        assert_eq!(state.title.as_deref(), Some("main"));
    }

    #[tokio::test]
    async fn test_reset_keeps_disabled_flag() {
        let (_pool, repo) = setup().await;
        repo.record_failure(TABLE, 10, Utc::now()).await.unwrap();
        repo.disable(TABLE, 10).await.unwrap();
        repo.disable(TABLE, 10).await.unwrap();

        repo.reset_failures(TABLE, 10).await.unwrap();

        let state = repo.get(TABLE, 10).await.unwrap().unwrap();
        assert_eq!(state.failures, 0);
        assert_eq!(state.first_failure, None);
        assert!(state.is_disabled);
    }

    #[tokio::test]
    async fn test_missing_row() {
        let (_pool, repo) = setup().await;
        repo.record_failure(TABLE, 99, Utc::now()).await.unwrap();
        assert!(repo.get(TABLE, 99).await.unwrap().is_none());
    }
}
