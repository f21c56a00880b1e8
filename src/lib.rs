pub mod app;
pub mod cli;
pub mod shutdown;

pub use app::Application;
pub use cli::run;
pub use shutdown::{wait_for_signal, ShutdownManager};
