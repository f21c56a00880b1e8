use async_trait::async_trait;
use chrono::Utc;
use clerk_core::{ClerkError, ClerkResult, NotificationContext, Notifier, User};
use sqlx::SqlitePool;
use tracing::debug;

/// 把通知写入 `pending_emails`，由独立的邮件发送进程投递
pub struct OutboxNotifier {
    pool: SqlitePool,
}

impl OutboxNotifier {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Notifier for OutboxNotifier {
    async fn send(
        &self,
        user: &User,
        template: &str,
        context: &NotificationContext,
    ) -> ClerkResult<()> {
        let to_address = user
            .contact_address
            .as_deref()
            .filter(|address| !address.trim().is_empty())
            .ok_or_else(|| ClerkError::Notification(format!("用户 {} 没有通知地址", user.id)))?;

        let arguments = serde_json::to_string(context)
            .map_err(|e| ClerkError::Serialization(format!("序列化通知参数失败: {e}")))?;

        sqlx::query(
            "INSERT INTO pending_emails (user_id, to_name, to_address, template, arguments, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user.id)
        .bind(&user.display_name)
        .bind(to_address)
        .bind(template)
        .bind(arguments)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        debug!("通知入队成功: user={}, template={}", user.id, template);
        Ok(())
    }
}
