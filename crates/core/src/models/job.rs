use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 队列中的一次工作单元
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub id: i64,
    /// 精确类型名，或 `<prefix>_<suffix>` 形式的动态类型
    pub job_type: String,
    /// 目标账户/记录ID，系统任务为空
    pub arg_id: Option<i64>,
    /// 辅助参数，含义由任务类型决定
    #[serde(default)]
    pub args: Vec<String>,
    /// 目标账户的所有者，系统任务为空
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn new(id: i64, job_type: impl Into<String>) -> Self {
        Self {
            id,
            job_type: job_type.into(),
            arg_id: None,
            args: Vec::new(),
            user_id: None,
            created_at: Utc::now(),
        }
    }

    /// 针对某个用户账户的任务
    pub fn for_account(id: i64, job_type: impl Into<String>, arg_id: i64, user_id: i64) -> Self {
        Self {
            arg_id: Some(arg_id),
            user_id: Some(user_id),
            ..Self::new(id, job_type)
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}
