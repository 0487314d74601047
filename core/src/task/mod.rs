pub mod convert;
pub mod models;
pub mod render;

pub use convert::{convert_task, convert_tasks, parse_timestamp};
pub use models::{pending_only, Priority, RawTask, Task, Walk};
pub use render::render_tasks;
