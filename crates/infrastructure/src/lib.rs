pub mod database;
pub mod notifier;
pub mod observability;
pub mod thresholds;

pub use database::{
    ensure_account_tables, run_migrations, DatabaseManager, SqliteAccountFailureRepository,
    SqliteJobRepository, SqliteUserRepository,
};
pub use notifier::OutboxNotifier;
pub use observability::init_metrics;
pub use thresholds::PremiumThresholds;
