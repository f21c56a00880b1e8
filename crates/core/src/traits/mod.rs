pub mod collaborators;
pub mod job_handler;
pub mod repository;

pub use collaborators::*;
pub use job_handler::*;
pub use repository::*;
