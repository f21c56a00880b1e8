use std::collections::HashMap;

use crate::catalogue;

/// 失败通知中描述账户的文字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountData {
    pub exchange_name: String,
    pub label: String,
    pub labels: String,
}

#[derive(Debug, Clone, Default)]
pub struct AccountDataCatalogue {
    entries: HashMap<String, AccountData>,
}

impl AccountDataCatalogue {
    pub fn builtin() -> Self {
        let mut data = Self::default();

        for (job_type, name) in catalogue::ACCOUNT_TYPES {
            data.insert(job_type, name, "account", "accounts");
        }
        for (job_type, name) in catalogue::INDIVIDUAL_SECURITY_TYPES {
            data.insert(job_type, name, "security", "securities");
        }

        data
    }

    pub fn insert(&mut self, job_type: &str, exchange_name: &str, label: &str, labels: &str) {
        self.entries.insert(
            job_type.to_string(),
            AccountData {
                exchange_name: exchange_name.to_string(),
                label: label.to_string(),
                labels: labels.to_string(),
            },
        );
    }

    /// 未登记的类型用类型名本身作为显示名称
    pub fn lookup(&self, job_type: &str) -> AccountData {
        self.entries.get(job_type).cloned().unwrap_or_else(|| AccountData {
            exchange_name: job_type.to_string(),
            label: "account".to_string(),
            labels: "accounts".to_string(),
        })
    }
}
