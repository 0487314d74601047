//! Typed access to the task-manager backend.
//!
//! [`TaskClient`] issues one `GET /tasks`, decodes the raw records and
//! converts them, subtasks included, into [`Task`] values with parsed
//! timestamps.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod task;

pub use client::{TaskClient, TaskSource};
pub use error::{ConvertError, TaskClientError, TaskHttpError};
pub use task::{Priority, RawTask, Task};
