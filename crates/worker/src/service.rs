use std::sync::Arc;
use std::time::Duration;

use clerk_core::{ClerkResult, JobRepository};
use metrics::counter;
use tokio::sync::broadcast;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use crate::runner::{JobReport, JobRunner};

/// Worker服务构建器
pub struct WorkerServiceBuilder {
    worker_id: String,
    jobs: Arc<dyn JobRepository>,
    runner: Arc<JobRunner>,
    poll_interval: Duration,
    batch_size: u32,
}

impl WorkerServiceBuilder {
    /// 创建新的构建器，默认使用主机名作为Worker ID
    pub fn new(jobs: Arc<dyn JobRepository>, runner: Arc<JobRunner>) -> Self {
        Self {
            worker_id: hostname::get()
                .unwrap_or_else(|_| "unknown".into())
                .to_string_lossy()
                .to_string(),
            jobs,
            runner,
            poll_interval: Duration::from_secs(5),
            batch_size: 20,
        }
    }

    /// 设置Worker ID，空字符串保留默认值
    pub fn worker_id(mut self, worker_id: String) -> Self {
        if !worker_id.is_empty() {
            self.worker_id = worker_id;
        }
        self
    }

    /// 设置轮询间隔
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// 设置每次轮询取出的任务数
    pub fn batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn build(self) -> WorkerService {
        WorkerService {
            worker_id: self.worker_id,
            jobs: self.jobs,
            runner: self.runner,
            poll_interval: self.poll_interval,
            batch_size: self.batch_size,
        }
    }
}

/// 轮询任务队列并逐个处理任务
pub struct WorkerService {
    worker_id: String,
    jobs: Arc<dyn JobRepository>,
    runner: Arc<JobRunner>,
    poll_interval: Duration,
    batch_size: u32,
}

impl WorkerService {
    pub fn builder(jobs: Arc<dyn JobRepository>, runner: Arc<JobRunner>) -> WorkerServiceBuilder {
        WorkerServiceBuilder::new(jobs, runner)
    }

    pub fn worker_id(&self) -> &str {
        &self.worker_id
    }

    /// 持续轮询，直到收到关闭信号
    ///
    /// 正在处理的批次会在关闭前处理完。
    pub async fn run(&self, mut shutdown_rx: broadcast::Receiver<()>) -> ClerkResult<()> {
        info!(
            "Worker {} 开始轮询任务, 间隔 {:?}, 批量 {}",
            self.worker_id, self.poll_interval, self.batch_size
        );

        let mut poll_interval = interval(self.poll_interval);

        loop {
            tokio::select! {
                _ = poll_interval.tick() => {
                    if let Err(e) = self.run_once().await {
                        error!("轮询任务失败: {}", e);
                    }
                }
                _ = shutdown_rx.recv() => {
                    info!("Worker {} 收到关闭信号, 停止轮询", self.worker_id);
                    break;
                }
            }
        }

        Ok(())
    }

    /// 取出一批待执行任务并按顺序处理
    pub async fn run_once(&self) -> ClerkResult<Vec<JobReport>> {
        let jobs = self.jobs.fetch_pending(self.batch_size).await?;
        if jobs.is_empty() {
            debug!("没有待执行的任务");
            return Ok(Vec::new());
        }

        debug!("取出 {} 个待执行任务", jobs.len());
        let mut reports = Vec::with_capacity(jobs.len());

        for job in jobs {
            let report = self.runner.process(&job).await;
            let outcome = if report.is_success() { "success" } else { "failure" };
            counter!("clerk_jobs_processed_total", "outcome" => outcome).increment(1);

            if let Some(e) = &report.error {
                warn!("任务 {} ({}) 执行失败: {}", job.id, job.job_type, e);
            }

            // 标记失败不影响同批次其余任务
            if let Err(e) = self
                .jobs
                .mark_executed(job.id, report.error_message().as_deref())
                .await
            {
                error!("标记任务 {} 已执行失败: {}", job.id, e);
                counter!("clerk_job_mark_errors_total").increment(1);
            }
            reports.push(report);
        }

        Ok(reports)
    }
}
