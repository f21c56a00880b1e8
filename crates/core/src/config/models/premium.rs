use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::UserTier;

/// 按用户等级区分的失败阈值
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierThresholds {
    pub free: u32,
    pub premium: u32,
}

impl TierThresholds {
    pub fn for_tier(&self, tier: UserTier) -> u32 {
        match tier {
            UserTier::Free => self.free,
            UserTier::Premium => self.premium,
        }
    }
}

/// 高级账户相关配置，这里只包含失败阈值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PremiumConfig {
    pub max_failures_free: u32,
    pub max_failures_premium: u32,
    /// 按分组覆盖默认阈值
    #[serde(default)]
    pub group_max_failures: HashMap<String, TierThresholds>,
}

impl Default for PremiumConfig {
    fn default() -> Self {
        Self {
            max_failures_free: 4,
            max_failures_premium: 8,
            group_max_failures: HashMap::new(),
        }
    }
}

impl PremiumConfig {
    pub fn default_thresholds(&self) -> TierThresholds {
        TierThresholds {
            free: self.max_failures_free,
            premium: self.max_failures_premium,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_failures_free == 0 || self.max_failures_premium == 0 {
            return Err(anyhow::anyhow!("最大失败次数必须大于0"));
        }

        for (group, thresholds) in &self.group_max_failures {
            if group.is_empty() {
                return Err(anyhow::anyhow!("分组名称不能为空"));
            }
            if thresholds.free == 0 || thresholds.premium == 0 {
                return Err(anyhow::anyhow!("分组 {group} 的最大失败次数必须大于0"));
            }
        }

        Ok(())
    }
}
