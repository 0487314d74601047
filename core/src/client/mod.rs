pub mod http_client;
pub mod r#trait;

pub use http_client::{TaskClient, TASKS_PATH};
pub use r#trait::TaskSource;
