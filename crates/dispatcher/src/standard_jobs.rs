use std::collections::{BTreeSet, HashMap};

use clerk_core::{ClerkError, ClerkResult, StandardJobDescriptor};
use tracing::debug;

use crate::catalogue;

/// 标准任务注册表
///
/// 启动时由声明式目录构建一次，之后只读。不在表中的任务类型不参与失败计数。
#[derive(Debug, Clone)]
pub struct StandardJobRegistry {
    by_type: HashMap<String, StandardJobDescriptor>,
}

impl StandardJobRegistry {
    pub fn new(descriptors: Vec<StandardJobDescriptor>) -> ClerkResult<Self> {
        let mut by_type = HashMap::with_capacity(descriptors.len());

        for descriptor in descriptors {
            if !is_valid_table_name(&descriptor.table) {
                return Err(ClerkError::config_error(format!(
                    "标准任务 {} 的表名无效: {}",
                    descriptor.job_type, descriptor.table
                )));
            }

            if by_type.contains_key(&descriptor.job_type) {
                return Err(ClerkError::config_error(format!(
                    "标准任务类型重复: {}",
                    descriptor.job_type
                )));
            }

            by_type.insert(descriptor.job_type.clone(), descriptor);
        }

        debug!("标准任务注册表包含 {} 个类型", by_type.len());
        Ok(Self { by_type })
    }

    pub fn builtin() -> ClerkResult<Self> {
        Self::new(builtin_catalogue())
    }

    pub fn find(&self, job_type: &str) -> Option<&StandardJobDescriptor> {
        self.by_type.get(job_type)
    }

    /// 只返回参与失败计数的描述
    pub fn find_tracked(&self, job_type: &str) -> Option<&StandardJobDescriptor> {
        self.find(job_type).filter(|d| d.failure_tracked)
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &StandardJobDescriptor> {
        self.by_type.values()
    }

    /// 全部账户失败状态表
    pub fn tables(&self) -> BTreeSet<&str> {
        self.by_type.values().map(|d| d.table.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

/// 表名会被直接拼进SQL，只允许小写字母、数字和下划线
pub fn is_valid_table_name(table: &str) -> bool {
    !table.is_empty()
        && table
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

pub fn builtin_catalogue() -> Vec<StandardJobDescriptor> {
    let accounts = catalogue::ACCOUNT_TYPES.iter().map(|(job_type, _)| {
        StandardJobDescriptor::tracked(job_type, &catalogue::account_table(job_type), "accounts")
    });

    let securities = catalogue::INDIVIDUAL_SECURITY_TYPES
        .iter()
        .map(|(job_type, _)| {
            StandardJobDescriptor::tracked(
                job_type,
                &catalogue::account_table(job_type),
                "individual_securities",
            )
        });

    accounts
        .chain(securities)
        .chain(std::iter::once(StandardJobDescriptor::untracked(
            "notification",
            "notifications",
            "notifications",
        )))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogue_is_valid() {
        let registry = StandardJobRegistry::builtin().unwrap();
        let bitstamp = registry.find("bitstamp").unwrap();
        assert!(bitstamp.failure_tracked);
        assert_eq!(bitstamp.table, "accounts_bitstamp");
        assert_eq!(bitstamp.group, "accounts");

        let crypto_trade = registry.find_tracked("crypto-trade").unwrap();
        assert_eq!(crypto_trade.table, "accounts_cryptotrade");
    }

    #[test]
    fn test_untracked_and_unknown_types() {
        let registry = StandardJobRegistry::builtin().unwrap();
        assert!(registry.find("notification").is_some());
        assert!(registry.find_tracked("notification").is_none());
        assert!(registry.find("ticker").is_none());
        assert!(registry.find("unknown_widget").is_none());
        assert!(registry.find("address_btc").is_none());
    }

    #[test]
    fn test_duplicate_type_is_rejected() {
        let result = StandardJobRegistry::new(vec![
            StandardJobDescriptor::tracked("bitstamp", "accounts_bitstamp", "accounts"),
            StandardJobDescriptor::tracked("bitstamp", "accounts_bitstamp2", "accounts"),
        ]);
        assert!(matches!(result, Err(ClerkError::Configuration(_))));
    }

    #[test]
    fn test_unsafe_table_name_is_rejected() {
        let result = StandardJobRegistry::new(vec![StandardJobDescriptor::tracked(
            "bitstamp",
            "accounts; DROP TABLE users",
            "accounts",
        )]);
        assert!(result.is_err());
        assert!(!is_valid_table_name("accounts-cryptotrade"));
        assert!(is_valid_table_name("accounts_796"));
    }
}
