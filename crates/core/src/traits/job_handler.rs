//! 任务处理器接口定义
//!
//! 每个交易所/矿池的抓取逻辑都实现 [`JobHandler`]，引擎只负责把任务路由到
//! 正确的处理器并在处理器返回后记账。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use clerk_core::{HandlerFailure, traits::{JobContext, JobHandler}};
//!
//! pub struct TickerHandler;
//!
//! #[async_trait]
//! impl JobHandler for TickerHandler {
//!     fn name(&self) -> &str {
//!         "ticker"
//!     }
//!
//!     async fn execute(&self, ctx: &mut JobContext<'_>) -> Result<(), HandlerFailure> {
//!         let exchange = ctx.target.unwrap_or_default();
//!         sqlx::query("UPDATE ticker_recent SET is_recent = 0 WHERE exchange = ?")
//!             .bind(exchange)
//!             .execute(&mut *ctx.conn)
//!             .await?;
//!         Ok(())
//!     }
//! }
//! ```

use async_trait::async_trait;
use sqlx::SqliteConnection;

use crate::errors::HandlerFailure;
use crate::models::Job;

/// 任务执行上下文
///
/// 连接由执行器从连接池中获取，处理器返回后（无论成功失败）归还。
pub struct JobContext<'a> {
    pub job: &'a Job,
    /// 动态任务类型中经过校验的后缀（货币或交易所），精确类型为空
    pub target: Option<&'a str>,
    pub conn: &'a mut SqliteConnection,
}

impl std::fmt::Debug for JobContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobContext")
            .field("job", &self.job)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait JobHandler: Send + Sync {
    fn name(&self) -> &str;

    /// 执行任务。失败的分类由返回的 [`HandlerFailure`] 变体决定。
    async fn execute(&self, ctx: &mut JobContext<'_>) -> Result<(), HandlerFailure>;
}
