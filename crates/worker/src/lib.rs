pub mod executor;
pub mod format;
pub mod handlers;
pub mod outcome;
pub mod runner;
pub mod service;

pub use executor::JobExecutor;
pub use handlers::HandlerSet;
pub use outcome::{FailureOutcome, OutcomeHandler, FAILURE_TEMPLATE};
pub use runner::{JobReport, JobRunner};
pub use service::{WorkerService, WorkerServiceBuilder};
