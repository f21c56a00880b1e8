pub mod sqlite_account_repository;
pub mod sqlite_job_repository;
pub mod sqlite_user_repository;

pub use sqlite_account_repository::SqliteAccountFailureRepository;
pub use sqlite_job_repository::SqliteJobRepository;
pub use sqlite_user_repository::SqliteUserRepository;
