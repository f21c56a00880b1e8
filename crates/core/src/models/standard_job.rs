use serde::{Deserialize, Serialize};

/// 参与失败计数的任务类型描述
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StandardJobDescriptor {
    pub job_type: String,
    /// 此类型的任务结果是否影响账户失败计数
    pub failure_tracked: bool,
    /// 存放账户失败状态的表
    pub table: String,
    /// 逻辑分组，与用户额度统计对应
    pub group: String,
}

impl StandardJobDescriptor {
    pub fn tracked(job_type: &str, table: &str, group: &str) -> Self {
        Self {
            job_type: job_type.to_string(),
            failure_tracked: true,
            table: table.to_string(),
            group: group.to_string(),
        }
    }

    pub fn untracked(job_type: &str, table: &str, group: &str) -> Self {
        Self {
            failure_tracked: false,
            ..Self::tracked(job_type, table, group)
        }
    }
}
