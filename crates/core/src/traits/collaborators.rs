use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::models::{User, UserTier};
use crate::ClerkResult;

/// 通知模板的上下文变量
pub type NotificationContext = BTreeMap<String, String>;

/// 动态任务类型后缀的合法性查询
pub trait TargetRegistry: Send + Sync {
    fn name(&self) -> &str;
    fn is_valid(&self, key: &str) -> bool;
}

/// 按用户等级和分组查询最大失败次数
#[async_trait]
pub trait ThresholdProvider: Send + Sync {
    async fn max_failures(&self, tier: UserTier, group: &str) -> ClerkResult<u32>;
}

/// 通知发送接口
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(
        &self,
        user: &User,
        template: &str,
        context: &NotificationContext,
    ) -> ClerkResult<()>;
}
