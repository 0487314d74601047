use thiserror::Error;

use super::http::TaskHttpError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("invalid timestamp in `{field}` of task {title:?}: {value:?}")]
    InvalidTimestamp {
        field: &'static str,
        title: String,
        value: String,
    },
}

#[derive(Error, Debug)]
pub enum TaskClientError {
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),
    #[error(transparent)]
    Http(#[from] TaskHttpError),
    #[error("task conversion failed: {0}")]
    Convert(#[from] ConvertError),
}
