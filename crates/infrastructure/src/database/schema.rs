//! 表结构
//!
//! 账户表只包含失败计数需要的列，真实系统里它们由账户管理模块维护。

use clerk_core::ClerkResult;
use clerk_dispatcher::StandardJobRegistry;
use sqlx::SqlitePool;
use tracing::{debug, info};

/// 创建任务队列、用户和邮件队列表
pub async fn run_migrations(pool: &SqlitePool) -> ClerkResult<()> {
    debug!("运行SQLite数据库迁移");

    // 用户表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT,
            email TEXT,
            is_premium INTEGER NOT NULL DEFAULT 0,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 任务队列表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            job_type TEXT NOT NULL,
            arg_id INTEGER,
            args TEXT NOT NULL DEFAULT '[]',
            user_id INTEGER,
            priority INTEGER NOT NULL DEFAULT 10,
            is_executed INTEGER NOT NULL DEFAULT 0,
            is_error INTEGER NOT NULL DEFAULT 0,
            error_message TEXT,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            executed_at DATETIME
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 待发送邮件表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pending_emails (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER,
            to_name TEXT,
            to_address TEXT NOT NULL,
            template TEXT NOT NULL,
            arguments TEXT NOT NULL,
            is_sent INTEGER NOT NULL DEFAULT 0,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_jobs_pending ON jobs(is_executed, priority, id)")
        .execute(pool)
        .await?;

    info!("数据库迁移完成");
    Ok(())
}

/// 为每个记录失败的标准任务类型创建账户表
///
/// 表名来自注册表，构造时已经校验过字符集。
pub async fn ensure_account_tables(
    pool: &SqlitePool,
    registry: &StandardJobRegistry,
) -> ClerkResult<()> {
    let tables: Vec<&str> = registry
        .descriptors()
        .filter(|descriptor| descriptor.failure_tracked)
        .map(|descriptor| descriptor.table.as_str())
        .collect();

    for table in &tables {
        let sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS "{table}" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER,
                title TEXT,
                failures INTEGER NOT NULL DEFAULT 0,
                first_failure DATETIME,
                is_disabled INTEGER NOT NULL DEFAULT 0,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#
        );
        sqlx::query(&sql).execute(pool).await?;
    }

    info!("账户表检查完成, 共 {} 个", tables.len());
    Ok(())
}
