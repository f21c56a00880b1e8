//! # 数据模型
//!
//! 引擎读写的核心数据结构：
//!
//! - [`Job`] - 外部队列投递的一次工作单元，引擎只消费、不修改
//! - [`AccountFailureState`] - 账户表中与失败计数相关的字段
//! - [`User`] - 账户所有者，用于阈值查询和通知
//! - [`StandardJobDescriptor`] - 参与失败计数的任务类型描述
//!
//! ## 账户失败状态约束
//!
//! ```text
//! failures == 0  ⇒  first_failure IS NULL
//! is_disabled 只会在引擎内由 false 变为 true
//! ```

pub mod account;
pub mod job;
pub mod standard_job;
pub mod user;

pub use account::*;
pub use job::*;
pub use standard_job::*;
pub use user::*;
