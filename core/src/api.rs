//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `task_manager_core::api` instead of reaching into internal modules.

pub use crate::client::{TaskClient, TaskSource, TASKS_PATH};
pub use crate::config::{
    apply_env_overrides, load_default, load_from_path, AppConfig, BackendConfig, LoggingConfig,
};
pub use crate::error::{ConvertError, TaskClientError, TaskHttpError};
pub use crate::task::{
    convert_task, convert_tasks, parse_timestamp, pending_only, render_tasks, Priority, RawTask,
    Task,
};
