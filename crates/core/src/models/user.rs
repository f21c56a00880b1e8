use serde::{Deserialize, Serialize};

/// 用户账户等级，决定失败阈值
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserTier {
    Free,
    Premium,
}

impl UserTier {
    pub fn from_premium_flag(is_premium: bool) -> Self {
        if is_premium {
            UserTier::Premium
        } else {
            UserTier::Free
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserTier::Free => "free",
            UserTier::Premium => "premium",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub display_name: Option<String>,
    /// 通知地址，为空时不发送通知
    pub contact_address: Option<String>,
    pub tier: UserTier,
}

impl User {
    pub fn is_notifiable(&self) -> bool {
        self.contact_address
            .as_deref()
            .is_some_and(|address| !address.trim().is_empty())
    }

    /// 称呼用户时使用的名称，没有设置名称时退回到通知地址
    pub fn greeting_name(&self) -> String {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or(self.contact_address.as_deref())
            .unwrap_or_default()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_name_falls_back_to_address() {
        let mut user = User {
            id: 1,
            display_name: None,
            contact_address: Some("jo@example.com".to_string()),
            tier: UserTier::Free,
        };
        assert_eq!(user.greeting_name(), "jo@example.com");

        user.display_name = Some("Jo".to_string());
        assert_eq!(user.greeting_name(), "Jo");
    }

    #[test]
    fn test_blank_address_is_not_notifiable() {
        let user = User {
            id: 1,
            display_name: None,
            contact_address: Some("  ".to_string()),
            tier: UserTier::Premium,
        };
        assert!(!user.is_notifiable());
    }
}
