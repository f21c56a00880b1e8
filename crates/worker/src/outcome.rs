//! 任务结果记账
//!
//! 成功时清零账户的失败计数；失败时按分类决定是否计数，计数达到用户等级
//! 对应的阈值后禁用账户并通知用户一次。
//!
//! 每个步骤都是独立的语句，不使用跨语句事务：计数由存储层的一条条件更新
//! 完成，之后的读取只用于判断阈值。

use std::sync::Arc;

use chrono::Utc;
use clerk_core::{
    AccountFailureRepository, AccountFailureState, ClerkError, ClerkResult, FailureClass, Job,
    NotificationContext, Notifier, StandardJobDescriptor, ThresholdProvider, User,
    UserRepository,
};
use clerk_dispatcher::{AccountDataCatalogue, StandardJobRegistry};
use metrics::counter;
use tracing::{debug, error, info, warn};

use crate::format::{format_elapsed, number_format};

/// 失败通知使用的模板名
pub const FAILURE_TEMPLATE: &str = "failure";

/// `on_failure` 的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureOutcome {
    /// 任务类型不记录失败
    NotTracked,
    /// 任务类型记录失败，但任务没有目标账户
    MissingTarget,
    /// 上游临时故障，什么都没有修改
    Ignored,
    /// 计数已增加，但找不到账户所有者
    UserNotFound,
    /// 计数后重新读取时账户行已不存在
    AccountMissing,
    BelowThreshold { failures: i64, threshold: u32 },
    Disabled {
        failures: i64,
        threshold: u32,
        /// 本次失败是否发送了通知
        notified: bool,
    },
}

/// 处理任务成功/失败后的账户状态
pub struct OutcomeHandler {
    standard_jobs: Arc<StandardJobRegistry>,
    accounts: Arc<dyn AccountFailureRepository>,
    users: Arc<dyn UserRepository>,
    thresholds: Arc<dyn ThresholdProvider>,
    notifier: Arc<dyn Notifier>,
    account_data: AccountDataCatalogue,
    accounts_url: String,
    notifications_enabled: bool,
}

impl OutcomeHandler {
    pub fn new(
        standard_jobs: Arc<StandardJobRegistry>,
        accounts: Arc<dyn AccountFailureRepository>,
        users: Arc<dyn UserRepository>,
        thresholds: Arc<dyn ThresholdProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            standard_jobs,
            accounts,
            users,
            thresholds,
            notifier,
            account_data: AccountDataCatalogue::builtin(),
            accounts_url: String::new(),
            notifications_enabled: true,
        }
    }

    pub fn account_data(mut self, account_data: AccountDataCatalogue) -> Self {
        self.account_data = account_data;
        self
    }

    pub fn accounts_url(mut self, url: impl Into<String>) -> Self {
        self.accounts_url = url.into();
        self
    }

    pub fn notifications_enabled(mut self, enabled: bool) -> Self {
        self.notifications_enabled = enabled;
        self
    }

    /// 任务成功：清零失败计数和首次失败时间，不修改禁用标志
    pub async fn on_success(&self, job: &Job) -> ClerkResult<()> {
        let Some((descriptor, account_id)) = self.tracked_target(job) else {
            return Ok(());
        };

        self.accounts
            .reset_failures(&descriptor.table, account_id)
            .await?;
        debug!(
            "重置账户失败计数: table={}, id={}",
            descriptor.table, account_id
        );
        Ok(())
    }

    /// 任务失败：计数、判断阈值、必要时禁用并通知
    pub async fn on_failure(&self, job: &Job, error: &ClerkError) -> ClerkResult<FailureOutcome> {
        let Some(descriptor) = self.standard_jobs.find_tracked(&job.job_type) else {
            return Ok(FailureOutcome::NotTracked);
        };
        let Some(account_id) = job.arg_id else {
            warn!(
                "任务 {} ({}) 记录失败但没有目标账户",
                job.id, job.job_type
            );
            return Ok(FailureOutcome::MissingTarget);
        };

        let class = error.failure_class();
        counter!("clerk_job_failures_total", "class" => class.as_str()).increment(1);

        if class == FailureClass::Ignorable {
            info!(
                "忽略任务 {} ({}) 的临时失败: {}",
                job.id, job.job_type, error
            );
            return Ok(FailureOutcome::Ignored);
        }

        info!(
            "任务 {} ({}) 失败, 计入账户 {}#{}: {}",
            job.id, job.job_type, descriptor.table, account_id, error
        );
        self.accounts
            .record_failure(&descriptor.table, account_id, Utc::now())
            .await?;

        let Some(user) = self.find_owner(job).await? else {
            warn!(
                "任务 {} 的账户所有者 {:?} 不存在, 跳过阈值检查",
                job.id, job.user_id
            );
            return Ok(FailureOutcome::UserNotFound);
        };

        let Some(account) = self.accounts.get(&descriptor.table, account_id).await? else {
            warn!(
                "账户 {}#{} 在计数后不存在, 跳过阈值检查",
                descriptor.table, account_id
            );
            return Ok(FailureOutcome::AccountMissing);
        };

        let threshold = self
            .thresholds
            .max_failures(user.tier, &descriptor.group)
            .await?;

        if account.failures < i64::from(threshold) {
            debug!(
                "账户 {}#{} 失败 {}/{} 次",
                descriptor.table, account_id, account.failures, threshold
            );
            return Ok(FailureOutcome::BelowThreshold {
                failures: account.failures,
                threshold,
            });
        }

        self.accounts.disable(&descriptor.table, account_id).await?;

        let newly_disabled = !account.is_disabled;
        if newly_disabled {
            counter!("clerk_accounts_disabled_total", "group" => descriptor.group.clone())
                .increment(1);
            warn!(
                "账户 {}#{} 连续失败 {} 次 (阈值 {}), 已禁用",
                descriptor.table, account_id, account.failures, threshold
            );
        }

        let mut notified = false;
        if newly_disabled && self.notifications_enabled && user.is_notifiable() {
            let context = self.notification_context(descriptor, &user, &account, error);
            // 账户已经禁用，之后的失败不会再触发通知
            match self.notifier.send(&user, FAILURE_TEMPLATE, &context).await {
                Ok(()) => {
                    notified = true;
                    counter!("clerk_failure_notifications_total").increment(1);
                    info!("已通知用户 {} 账户被禁用", user.id);
                }
                Err(e) => {
                    counter!("clerk_failure_notifications_lost_total").increment(1);
                    error!(
                        "账户 {}#{} 已禁用, 但通知用户 {} 失败, 通知已丢失: {}",
                        descriptor.table, account_id, user.id, e
                    );
                }
            }
        }

        Ok(FailureOutcome::Disabled {
            failures: account.failures,
            threshold,
            notified,
        })
    }

    fn tracked_target(&self, job: &Job) -> Option<(&StandardJobDescriptor, i64)> {
        let descriptor = self.standard_jobs.find_tracked(&job.job_type)?;
        Some((descriptor, job.arg_id?))
    }

    async fn find_owner(&self, job: &Job) -> ClerkResult<Option<User>> {
        match job.user_id {
            Some(user_id) => self.users.find(user_id).await,
            None => Ok(None),
        }
    }

    fn notification_context(
        &self,
        descriptor: &StandardJobDescriptor,
        user: &User,
        account: &AccountFailureState,
        error: &ClerkError,
    ) -> NotificationContext {
        let data = self.account_data.lookup(&descriptor.job_type);
        let length = account
            .first_failure
            .map(|first| format_elapsed(Utc::now() - first))
            .unwrap_or_default();

        NotificationContext::from([
            ("name".to_string(), user.greeting_name()),
            ("exchange".to_string(), data.exchange_name),
            ("label".to_string(), data.label),
            ("labels".to_string(), data.labels),
            ("failures".to_string(), number_format(account.failures)),
            ("message".to_string(), error.to_string()),
            ("length".to_string(), length),
            ("title".to_string(), account.display_title()),
            ("url".to_string(), self.accounts_url.clone()),
        ])
    }
}
