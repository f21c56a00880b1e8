pub mod manager;
pub mod schema;
pub mod sqlite;

pub use manager::DatabaseManager;
pub use schema::{ensure_account_tables, run_migrations};
pub use sqlite::{SqliteAccountFailureRepository, SqliteJobRepository, SqliteUserRepository};
