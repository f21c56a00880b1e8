use std::sync::Arc;
use std::time::Instant;

use clerk_core::{ClerkError, ClerkResult, Job, JobContext};
use clerk_dispatcher::HandlerRef;
use sqlx::SqlitePool;
use tracing::{debug, info_span, warn, Instrument};

use crate::handlers::HandlerSet;

/// Runs the handler behind a resolved route
///
/// Each execution borrows one pooled connection for the handler; the
/// connection goes back to the pool when the handler returns, whatever the
/// result.
#[derive(Clone)]
pub struct JobExecutor {
    pool: SqlitePool,
    handlers: Arc<HandlerSet>,
}

impl JobExecutor {
    pub fn new(pool: SqlitePool, handlers: Arc<HandlerSet>) -> Self {
        Self { pool, handlers }
    }

    pub fn handlers(&self) -> &HandlerSet {
        &self.handlers
    }

    pub async fn execute(&self, job: &Job, route: &HandlerRef) -> ClerkResult<()> {
        let handler = self
            .handlers
            .lookup(route)
            .ok_or_else(|| ClerkError::HandlerNotRegistered(route.to_string()))?;

        let span = info_span!(
            "job",
            job_id = job.id,
            job_type = %job.job_type,
            handler = handler.name()
        );

        async move {
            let started = Instant::now();
            let mut conn = self.pool.acquire().await?;
            let mut ctx = JobContext {
                job,
                target: route.target(),
                conn: &mut *conn,
            };

            let result = handler.execute(&mut ctx).await;
            let elapsed_ms = started.elapsed().as_millis();

            match result {
                Ok(()) => {
                    debug!("任务执行完成, 耗时 {}ms", elapsed_ms);
                    Ok(())
                }
                Err(failure) => {
                    warn!("任务执行失败, 耗时 {}ms: {}", elapsed_ms, failure);
                    Err(ClerkError::Handler(failure))
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use clerk_core::{FailureClass, HandlerFailure, JobHandler};
    use clerk_dispatcher::DynamicFamily;
    use sqlx::sqlite::SqlitePoolOptions;

    struct RecordingHandler;

    #[async_trait]
    impl JobHandler for RecordingHandler {
        fn name(&self) -> &str {
            "recording"
        }

        async fn execute(&self, ctx: &mut JobContext<'_>) -> Result<(), HandlerFailure> {
            sqlx::query("INSERT INTO seen (job_id, target) VALUES (?, ?)")
                .bind(ctx.job.id)
                .bind(ctx.target)
                .execute(&mut *ctx.conn)
                .await?;
            Ok(())
        }
    }

    struct BlockedHandler;

    #[async_trait]
    impl JobHandler for BlockedHandler {
        fn name(&self) -> &str {
            "blocked"
        }

        async fn execute(&self, _ctx: &mut JobContext<'_>) -> Result<(), HandlerFailure> {
            Err(HandlerFailure::EdgeNetworkBlock("403 from edge".to_string()))
        }
    }

    async fn pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query("CREATE TABLE seen (job_id INTEGER NOT NULL, target TEXT)")
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    #[tokio::test]
    async fn test_handler_receives_target_and_connection() {
        let pool = pool().await;
        let handlers =
            HandlerSet::new().register_family(DynamicFamily::Ticker, Arc::new(RecordingHandler));
        let executor = JobExecutor::new(pool.clone(), Arc::new(handlers));

        let job = Job::new(7, "ticker_kraken");
        let route = HandlerRef::Discovered {
            family: DynamicFamily::Ticker,
            target: "kraken".to_string(),
        };
        executor.execute(&job, &route).await.unwrap();

        let (job_id, target): (i64, Option<String>) =
            sqlx::query_as("SELECT job_id, target FROM seen")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(job_id, 7);
        assert_eq!(target.as_deref(), Some("kraken"));
    }

    #[tokio::test]
    async fn test_handler_failure_is_passed_through() {
        let handlers = HandlerSet::new().register_exact("bitstamp", Arc::new(BlockedHandler));
        let executor = JobExecutor::new(pool().await, Arc::new(handlers));

        let err = executor
            .execute(&Job::new(1, "bitstamp"), &HandlerRef::Exact("bitstamp"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClerkError::Handler(HandlerFailure::EdgeNetworkBlock(_))
        ));
        assert_eq!(err.failure_class(), FailureClass::Ignorable);
    }

    #[tokio::test]
    async fn test_missing_handler() {
        let executor = JobExecutor::new(pool().await, Arc::new(HandlerSet::new()));
        let err = executor
            .execute(&Job::new(1, "kraken"), &HandlerRef::Exact("kraken"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClerkError::HandlerNotRegistered(key) if key == "kraken"));
    }
}
