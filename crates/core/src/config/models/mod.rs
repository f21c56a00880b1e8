pub mod app_config;
pub mod database;
pub mod notification;
pub mod observability;
pub mod premium;
pub mod worker;

// Re-export main types for easier imports
pub use app_config::AppConfig;
pub use database::DatabaseConfig;
pub use notification::NotificationConfig;
pub use observability::ObservabilityConfig;
pub use premium::{PremiumConfig, TierThresholds};
pub use worker::WorkerConfig;
