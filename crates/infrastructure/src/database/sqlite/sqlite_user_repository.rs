use async_trait::async_trait;
use clerk_core::{ClerkResult, User, UserRepository, UserTier};
use sqlx::{Row, SqlitePool};

/// SQLite implementation of UserRepository
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> ClerkResult<User> {
        let is_premium: bool = row.try_get("is_premium")?;
        Ok(User {
            id: row.try_get("id")?,
            display_name: row.try_get("name")?,
            contact_address: row.try_get("email")?,
            tier: UserTier::from_premium_flag(is_premium),
        })
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find(&self, user_id: i64) -> ClerkResult<Option<User>> {
        let row = sqlx::query("SELECT id, name, email, is_premium FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    use crate::database::schema::run_migrations;

    #[tokio::test]
    async fn test_find_user() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        sqlx::query("INSERT INTO users (id, name, email, is_premium) VALUES (1, 'Jo', 'jo@example.com', 1), (2, NULL, NULL, 0)")
            .execute(&pool)
            .await
            .unwrap();

        let repo = SqliteUserRepository::new(pool);

        let premium = repo.find(1).await.unwrap().unwrap();
        assert_eq!(premium.tier, UserTier::Premium);
        assert_eq!(premium.display_name.as_deref(), Some("Jo"));
        assert!(premium.is_notifiable());

        let free = repo.find(2).await.unwrap().unwrap();
        assert_eq!(free.tier, UserTier::Free);
        assert!(!free.is_notifiable());

        assert!(repo.find(3).await.unwrap().is_none());
    }
}
