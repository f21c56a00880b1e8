//! 任务路由：注册表、任务类型解析和标准任务目录。
//!
//! 这里的一切都是纯查找，启动时构建一次，之后只读共享。

pub mod account_data;
pub mod catalogue;
pub mod registries;
pub mod resolver;
pub mod standard_jobs;

pub use account_data::{AccountData, AccountDataCatalogue};
pub use registries::{DynamicFamily, Registries, StaticRegistry};
pub use resolver::{HandlerRef, JobTypeResolver};
pub use standard_jobs::StandardJobRegistry;
