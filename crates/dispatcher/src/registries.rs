use std::collections::HashSet;
use std::sync::Arc;

use clerk_core::TargetRegistry;

use crate::catalogue;

/// 启动时构建一次的只读键集合
#[derive(Debug, Clone)]
pub struct StaticRegistry {
    name: String,
    keys: HashSet<String>,
}

impl StaticRegistry {
    pub fn new<I, S>(name: &str, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl TargetRegistry for StaticRegistry {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_valid(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

/// 动态任务类型族
///
/// 顺序即解析时尝试前缀的顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DynamicFamily {
    Address,
    BlockCount,
    Difficulty,
    Markets,
    Ticker,
}

impl DynamicFamily {
    pub const ALL: [DynamicFamily; 5] = [
        DynamicFamily::Address,
        DynamicFamily::BlockCount,
        DynamicFamily::Difficulty,
        DynamicFamily::Markets,
        DynamicFamily::Ticker,
    ];

    /// 不带下划线的前缀名
    pub fn prefix(&self) -> &'static str {
        match self {
            DynamicFamily::Address => "address",
            DynamicFamily::BlockCount => "blockcount",
            DynamicFamily::Difficulty => "difficulty",
            DynamicFamily::Markets => "markets",
            DynamicFamily::Ticker => "ticker",
        }
    }

    /// 任务类型以 `<prefix>_` 开头时返回后缀
    pub fn strip<'a>(&self, job_type: &'a str) -> Option<&'a str> {
        job_type
            .strip_prefix(self.prefix())
            .and_then(|rest| rest.strip_prefix('_'))
    }
}

impl std::fmt::Display for DynamicFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// 动态任务类型使用的全部注册表
#[derive(Clone)]
pub struct Registries {
    pub address_currencies: Arc<dyn TargetRegistry>,
    /// 地址货币中已迁移到共享余额处理器的子集
    pub balance_currencies: Arc<dyn TargetRegistry>,
    pub block_currencies: Arc<dyn TargetRegistry>,
    pub difficulty_currencies: Arc<dyn TargetRegistry>,
    pub exchanges: Arc<dyn TargetRegistry>,
}

impl Registries {
    pub fn builtin() -> Self {
        Self {
            address_currencies: Arc::new(StaticRegistry::new(
                "address currencies",
                catalogue::ADDRESS_CURRENCIES.iter().copied(),
            )),
            balance_currencies: Arc::new(StaticRegistry::new(
                "balance currencies",
                catalogue::BALANCE_CURRENCIES.iter().copied(),
            )),
            block_currencies: Arc::new(StaticRegistry::new(
                "block currencies",
                catalogue::BLOCK_CURRENCIES.iter().copied(),
            )),
            difficulty_currencies: Arc::new(StaticRegistry::new(
                "difficulty currencies",
                catalogue::DIFFICULTY_CURRENCIES.iter().copied(),
            )),
            exchanges: Arc::new(StaticRegistry::new(
                "exchanges",
                catalogue::EXCHANGES.iter().copied(),
            )),
        }
    }

    /// 校验某个族的后缀所使用的注册表
    pub fn for_family(&self, family: DynamicFamily) -> &dyn TargetRegistry {
        match family {
            DynamicFamily::Address => self.address_currencies.as_ref(),
            DynamicFamily::BlockCount => self.block_currencies.as_ref(),
            DynamicFamily::Difficulty => self.difficulty_currencies.as_ref(),
            DynamicFamily::Markets | DynamicFamily::Ticker => self.exchanges.as_ref(),
        }
    }
}

impl Default for Registries {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for Registries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registries")
            .field("address_currencies", &self.address_currencies.name())
            .field("balance_currencies", &self.balance_currencies.name())
            .field("block_currencies", &self.block_currencies.name())
            .field("difficulty_currencies", &self.difficulty_currencies.name())
            .field("exchanges", &self.exchanges.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_prefix() {
        assert_eq!(DynamicFamily::Ticker.strip("ticker_bitstamp"), Some("bitstamp"));
        assert_eq!(DynamicFamily::Ticker.strip("ticker_"), Some(""));
        assert_eq!(DynamicFamily::Ticker.strip("ticker"), None);
        assert_eq!(DynamicFamily::Ticker.strip("tickerx_bitstamp"), None);
        assert_eq!(DynamicFamily::Address.strip("blockcount_btc"), None);
    }

    #[test]
    fn test_builtin_registries() {
        let registries = Registries::builtin();
        assert!(registries.address_currencies.is_valid("btc"));
        assert!(registries.exchanges.is_valid("bitstamp"));
        assert!(!registries.exchanges.is_valid("btce"));
        assert_eq!(
            registries.for_family(DynamicFamily::Markets).name(),
            "exchanges"
        );
    }

    #[test]
    fn test_balance_currencies_are_address_currencies() {
        for currency in catalogue::BALANCE_CURRENCIES {
            assert!(
                catalogue::ADDRESS_CURRENCIES.contains(currency),
                "{currency} is a balance currency but not an address currency"
            );
        }
    }
}
