use async_trait::async_trait;
use chrono::Utc;
use clerk_core::{ClerkError, ClerkResult, Job, JobRepository};
use sqlx::{Row, SqlitePool};
use tracing::debug;

/// 任务队列的SQLite实现
///
/// 优先级数值越小越先执行，同优先级按入队顺序。
pub struct SqliteJobRepository {
    pool: SqlitePool,
}

impl SqliteJobRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 加入一个待执行任务，返回任务ID
    pub async fn enqueue(&self, job: &Job, priority: i64) -> ClerkResult<i64> {
        let args = serde_json::to_string(&job.args)
            .map_err(|e| ClerkError::Serialization(format!("序列化任务参数失败: {e}")))?;

        let result = sqlx::query(
            "INSERT INTO jobs (job_type, arg_id, args, user_id, priority, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&job.job_type)
        .bind(job.arg_id)
        .bind(args)
        .bind(job.user_id)
        .bind(priority)
        .bind(job.created_at)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!("任务入队成功: id={}, type={}", id, job.job_type);
        Ok(id)
    }

    fn row_to_job(row: &sqlx::sqlite::SqliteRow) -> ClerkResult<Job> {
        let args: String = row.try_get("args")?;
        let args = serde_json::from_str(&args)
            .map_err(|e| ClerkError::Serialization(format!("解析任务参数失败: {e}")))?;

        Ok(Job {
            id: row.try_get("id")?,
            job_type: row.try_get("job_type")?,
            arg_id: row.try_get("arg_id")?,
            args,
            user_id: row.try_get("user_id")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl JobRepository for SqliteJobRepository {
    async fn fetch_pending(&self, limit: u32) -> ClerkResult<Vec<Job>> {
        let rows = sqlx::query(
            "SELECT id, job_type, arg_id, args, user_id, created_at FROM jobs WHERE is_executed = 0 ORDER BY priority ASC, id ASC LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_job).collect()
    }

    async fn mark_executed(&self, job_id: i64, error: Option<&str>) -> ClerkResult<()> {
        sqlx::query(
            "UPDATE jobs SET is_executed = 1, is_error = ?, error_message = ?, executed_at = ? WHERE id = ?",
        )
        .bind(error.is_some())
        .bind(error)
        .bind(Utc::now())
        .bind(job_id)
        .execute(&self.pool)
        .await?;

        debug!("标记任务已执行成功: id={}", job_id);
        Ok(())
    }
}
