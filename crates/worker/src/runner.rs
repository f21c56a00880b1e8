use std::sync::Arc;

use clerk_core::{ClerkError, ClerkResult, Job};
use clerk_dispatcher::JobTypeResolver;
use tracing::{debug, error};

use crate::executor::JobExecutor;
use crate::outcome::{FailureOutcome, OutcomeHandler};

/// 一次完整处理的结果
#[derive(Debug)]
pub struct JobReport {
    pub job_id: i64,
    pub job_type: String,
    /// 任务本身的错误；成功时为空
    pub error: Option<ClerkError>,
    /// 失败记账的结果；成功时为空
    pub failure: Option<FailureOutcome>,
    /// 记账本身出错时的错误（计数、阈值查询或通知）
    pub accounting_error: Option<ClerkError>,
}

impl JobReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// 写回任务队列的错误信息
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// 解析任务类型、执行处理器并把结果交给记账
pub struct JobRunner {
    resolver: Arc<JobTypeResolver>,
    executor: JobExecutor,
    outcomes: OutcomeHandler,
}

impl JobRunner {
    pub fn new(
        resolver: Arc<JobTypeResolver>,
        executor: JobExecutor,
        outcomes: OutcomeHandler,
    ) -> Self {
        Self {
            resolver,
            executor,
            outcomes,
        }
    }

    /// 解析并执行任务，不做任何记账
    pub async fn run(&self, job: &Job) -> ClerkResult<()> {
        let route = self.resolver.resolve(&job.job_type)?;
        debug!("任务 {} ({}) 路由到 {}", job.id, job.job_type, route);
        self.executor.execute(job, &route).await
    }

    pub async fn on_success(&self, job: &Job) -> ClerkResult<()> {
        self.outcomes.on_success(job).await
    }

    pub async fn on_failure(&self, job: &Job, error: &ClerkError) -> ClerkResult<FailureOutcome> {
        self.outcomes.on_failure(job, error).await
    }

    /// 执行任务并记账
    ///
    /// 路由错误同样交给 `on_failure`；它们的类型不在标准任务表中，不会被计数。
    pub async fn process(&self, job: &Job) -> JobReport {
        let mut report = JobReport {
            job_id: job.id,
            job_type: job.job_type.clone(),
            error: None,
            failure: None,
            accounting_error: None,
        };

        match self.run(job).await {
            Ok(()) => {
                if let Err(e) = self.on_success(job).await {
                    error!("任务 {} 成功后重置失败计数出错: {}", job.id, e);
                    report.accounting_error = Some(e);
                }
            }
            Err(job_error) => {
                match self.on_failure(job, &job_error).await {
                    Ok(outcome) => report.failure = Some(outcome),
                    Err(e) => {
                        error!("任务 {} 失败记账出错: {}", job.id, e);
                        report.accounting_error = Some(e);
                    }
                }
                report.error = Some(job_error);
            }
        }

        report
    }
}
