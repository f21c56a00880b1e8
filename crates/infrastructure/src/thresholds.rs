use async_trait::async_trait;
use clerk_core::{ClerkResult, PremiumConfig, ThresholdProvider, UserTier};

/// 基于配置的失败阈值
///
/// 分组有覆盖值时使用覆盖值，否则使用等级默认值。
#[derive(Debug, Clone)]
pub struct PremiumThresholds {
    config: PremiumConfig,
}

impl PremiumThresholds {
    pub fn new(config: PremiumConfig) -> Self {
        Self { config }
    }

    pub fn threshold(&self, tier: UserTier, group: &str) -> u32 {
        self.config
            .group_max_failures
            .get(group)
            .copied()
            .unwrap_or_else(|| self.config.default_thresholds())
            .for_tier(tier)
    }
}

#[async_trait]
impl ThresholdProvider for PremiumThresholds {
    async fn max_failures(&self, tier: UserTier, group: &str) -> ClerkResult<u32> {
        Ok(self.threshold(tier, group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clerk_core::TierThresholds;

    #[tokio::test]
    async fn test_group_override_and_default() {
        let mut config = PremiumConfig::default();
        config.group_max_failures.insert(
            "individual_securities".to_string(),
            TierThresholds {
                free: 2,
                premium: 6,
            },
        );
        let thresholds = PremiumThresholds::new(config);

        assert_eq!(
            thresholds
                .max_failures(UserTier::Free, "accounts")
                .await
                .unwrap(),
            4
        );
        assert_eq!(
            thresholds
                .max_failures(UserTier::Premium, "accounts")
                .await
                .unwrap(),
            8
        );
        assert_eq!(
            thresholds
                .max_failures(UserTier::Free, "individual_securities")
                .await
                .unwrap(),
            2
        );
        assert_eq!(
            thresholds
                .max_failures(UserTier::Premium, "individual_securities")
                .await
                .unwrap(),
            6
        );
    }
}
