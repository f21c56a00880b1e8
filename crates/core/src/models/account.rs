use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 账户行中与失败计数相关的字段
///
/// 行存放在标准任务描述中 `table` 指定的表里，以 `id` (即任务的 `arg_id`) 标识。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct AccountFailureState {
    pub id: i64,
    pub user_id: Option<i64>,
    pub title: Option<String>,
    pub failures: i64,
    pub first_failure: Option<DateTime<Utc>>,
    pub is_disabled: bool,
}

impl AccountFailureState {
    /// 通知中使用的账户标题
    pub fn display_title(&self) -> String {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => format!("\"{title}\""),
            _ => "untitled".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(title: Option<&str>) -> AccountFailureState {
        AccountFailureState {
            id: 1,
            user_id: Some(2),
            title: title.map(str::to_string),
            failures: 0,
            first_failure: None,
            is_disabled: false,
        }
    }

    #[test]
    fn test_display_title() {
        assert_eq!(state(Some("mining rig")).display_title(), "\"mining rig\"");
        assert_eq!(state(Some("")).display_title(), "untitled");
        assert_eq!(state(None).display_title(), "untitled");
    }
}
