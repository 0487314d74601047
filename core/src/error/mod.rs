#[allow(clippy::module_inception)]
pub mod error;
pub mod http;

pub use error::{ConvertError, TaskClientError};
pub use http::TaskHttpError;
