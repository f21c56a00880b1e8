use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clerk_core::AppConfig;
use clerk_dispatcher::{JobTypeResolver, StandardJobRegistry};
use clerk_infrastructure::{DatabaseManager, OutboxNotifier, PremiumThresholds};
use clerk_worker::{HandlerSet, JobExecutor, JobReport, JobRunner, OutcomeHandler, WorkerService};
use tokio::sync::broadcast;
use tracing::info;

/// 主应用程序
pub struct Application {
    database: DatabaseManager,
    service: WorkerService,
}

impl Application {
    /// 创建新的应用实例
    ///
    /// 处理器集合必须覆盖所有路由，否则在连接数据库之前拒绝启动，
    /// 不会消费任何任务。
    pub async fn new(config: &AppConfig, handlers: HandlerSet) -> Result<Self> {
        if handlers.is_empty() {
            return Err(anyhow::anyhow!("没有注册任何任务处理器, 拒绝启动"));
        }

        let resolver = Arc::new(JobTypeResolver::builtin());
        handlers
            .validate(&resolver)
            .context("任务处理器注册不完整")?;
        info!("已注册 {} 个任务处理器", handlers.len());

        let database = DatabaseManager::new(&config.database)
            .await
            .context("创建数据库连接池失败")?;

        let standard_jobs =
            Arc::new(StandardJobRegistry::builtin().context("构建标准任务注册表失败")?);
        database
            .migrate(&standard_jobs)
            .await
            .context("运行数据库迁移失败")?;

        let outcomes = OutcomeHandler::new(
            Arc::clone(&standard_jobs),
            database.account_failure_repository(),
            database.user_repository(),
            Arc::new(PremiumThresholds::new(config.premium.clone())),
            Arc::new(OutboxNotifier::new(database.pool().clone())),
        )
        .accounts_url(config.notification.accounts_url.clone())
        .notifications_enabled(config.notification.enabled);

        let executor = JobExecutor::new(database.pool().clone(), Arc::new(handlers));
        let runner = Arc::new(JobRunner::new(resolver, executor, outcomes));

        let service = WorkerService::builder(database.job_repository(), runner)
            .worker_id(config.worker.worker_id.clone())
            .poll_interval(Duration::from_secs(config.worker.poll_interval_seconds))
            .batch_size(config.worker.batch_size)
            .build();

        Ok(Self { database, service })
    }

    pub fn worker_id(&self) -> &str {
        self.service.worker_id()
    }

    /// 持续处理任务直到收到关闭信号
    pub async fn run(&self, shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        info!("启动Worker服务: {}", self.worker_id());
        self.service
            .run(shutdown_rx)
            .await
            .context("Worker服务运行失败")?;
        self.database.close().await;
        Ok(())
    }

    /// 处理一批任务后返回
    pub async fn run_once(&self) -> Result<Vec<JobReport>> {
        let reports = self.service.run_once().await.context("处理任务失败")?;
        let failed = reports.iter().filter(|r| !r.is_success()).count();
        info!("处理完成: {} 个任务, {} 个失败", reports.len(), failed);
        Ok(reports)
    }
}
