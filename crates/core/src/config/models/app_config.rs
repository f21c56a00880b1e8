use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{
    database::DatabaseConfig, notification::NotificationConfig,
    observability::ObservabilityConfig, premium::PremiumConfig, worker::WorkerConfig,
};

/// System configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub worker: WorkerConfig,
    #[serde(default)]
    pub premium: PremiumConfig,
    #[serde(default)]
    pub notification: NotificationConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from config file and environment variables
    ///
    /// Load order:
    /// 1. Default configuration
    /// 2. Config file (TOML format)
    /// 3. Environment variable overrides (prefix: CLERK_, nested keys joined by `__`)
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_path {
            if Path::new(path).exists() {
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            } else {
                return Err(anyhow::anyhow!("配置文件不存在: {}", path));
            }
        } else {
            let default_paths = ["config/clerk.toml", "clerk.toml", "/etc/clerk/config.toml"];

            if let Some(path) = default_paths.iter().find(|p| Path::new(p).exists()) {
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("CLERK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .build()
            .context("构建配置失败")?
            .try_deserialize()
            .context("反序列化配置失败")?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(toml_str).context("解析TOML配置失败")?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("序列化配置为TOML失败")
    }

    pub fn validate(&self) -> Result<()> {
        self.database.validate().context("数据库配置验证失败")?;
        self.worker.validate().context("Worker配置验证失败")?;
        self.premium.validate().context("失败阈值配置验证失败")?;
        self.notification.validate().context("通知配置验证失败")?;
        self.observability
            .validate()
            .context("可观测性配置验证失败")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserTier;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.premium.max_failures_free, 4);
        assert_eq!(config.premium.max_failures_premium, 8);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [premium]
            max_failures_free = 3
            max_failures_premium = 10

            [premium.group_max_failures.addresses]
            free = 2
            premium = 6
            "#,
        )
        .unwrap();

        assert_eq!(config.premium.max_failures_free, 3);
        assert_eq!(config.worker.batch_size, 20);
        let addresses = config.premium.group_max_failures["addresses"];
        assert_eq!(addresses.for_tier(UserTier::Free), 2);
        assert_eq!(addresses.for_tier(UserTier::Premium), 6);
    }

    #[test]
    fn test_zero_threshold_is_rejected() {
        let result = AppConfig::from_toml(
            r#"
            [premium]
            max_failures_free = 0
            max_failures_premium = 8
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_non_sqlite_database_is_rejected() {
        let mut config = AppConfig::default();
        config.database.url = "postgresql://localhost/clerk".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
            [worker]
            enabled = true
            poll_interval_seconds = 2
            batch_size = 5
            "#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.worker.poll_interval_seconds, 2);
        assert_eq!(config.worker.batch_size, 5);
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(AppConfig::load(Some("/nonexistent/clerk.toml")).is_err());
    }

    #[test]
    fn test_toml_roundtrip_keeps_overrides() {
        let mut config = AppConfig::default();
        config.notification.accounts_url = "https://clerk.example/wizard_accounts".to_string();
        let restored = AppConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(
            restored.notification.accounts_url,
            "https://clerk.example/wizard_accounts"
        );
    }
}
