//! 数据仓储层接口定义
//!
//! 引擎不拥有任何表，只对外部持久化的行做有界的读写：
//! - `AccountFailureRepository` - 账户失败计数
//! - `UserRepository` - 账户所有者查询
//! - `JobRepository` - 待执行任务队列
//!
//! 每个方法对应一条独立的原子语句，不假设任何跨语句事务。

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{AccountFailureState, Job, User};
use crate::ClerkResult;

/// 账户失败状态仓储接口
///
/// `table` 必须来自标准任务注册表，实现可以直接把它拼进SQL。
#[async_trait]
pub trait AccountFailureRepository: Send + Sync {
    /// 失败计数加一，`first_failure` 为空时设为 `now`。
    ///
    /// 必须由存储层在一条条件更新语句中完成，并发执行不会丢失计数。
    async fn record_failure(
        &self,
        table: &str,
        account_id: i64,
        now: DateTime<Utc>,
    ) -> ClerkResult<()>;

    /// 失败计数清零并清空 `first_failure`，不修改 `is_disabled`
    async fn reset_failures(&self, table: &str, account_id: i64) -> ClerkResult<()>;

    /// 禁用账户（幂等）
    async fn disable(&self, table: &str, account_id: i64) -> ClerkResult<()>;

    async fn get(&self, table: &str, account_id: i64) -> ClerkResult<Option<AccountFailureState>>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find(&self, user_id: i64) -> ClerkResult<Option<User>>;
}

/// 任务队列仓储接口
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// 按优先级取出尚未执行的任务
    async fn fetch_pending(&self, limit: u32) -> ClerkResult<Vec<Job>>;

    /// 标记任务已执行，`error` 非空时记录为失败
    async fn mark_executed(&self, job_id: i64, error: Option<&str>) -> ClerkResult<()>;
}
