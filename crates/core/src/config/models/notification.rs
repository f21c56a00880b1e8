use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub enabled: bool,
    /// 失败通知中指向账户管理页面的链接
    pub accounts_url: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            accounts_url: "https://localhost/wizard_accounts".to_string(),
        }
    }
}

impl NotificationConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.enabled && self.accounts_url.is_empty() {
            return Err(anyhow::anyhow!("账户页面URL不能为空"));
        }
        Ok(())
    }
}
