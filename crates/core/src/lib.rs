//! 任务分发与失败计数引擎的核心类型：错误、数据模型、协作接口和配置。

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

pub use config::{
    AppConfig, DatabaseConfig, NotificationConfig, ObservabilityConfig, PremiumConfig,
    TierThresholds, WorkerConfig,
};
pub use errors::*;
pub use models::{AccountFailureState, Job, StandardJobDescriptor, User, UserTier};
pub use traits::{
    AccountFailureRepository, JobContext, JobHandler, JobRepository, Notifier,
    NotificationContext, TargetRegistry, ThresholdProvider, UserRepository,
};
