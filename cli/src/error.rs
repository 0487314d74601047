use task_manager_core::api::TaskClientError;
use thiserror::Error;

use crate::logging::LoggingError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("logging setup failed: {0}")]
    Logging(#[from] LoggingError),
    #[error("{0}")]
    Client(#[from] TaskClientError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

pub fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success
    // 11: config error
    // 20: network / io error
    // 30: backend answered with something unusable
    // 50: internal/uncategorized
    match e {
        CliError::Config(_) | CliError::Logging(_) => 11,
        CliError::Client(ce) => match ce {
            TaskClientError::Build(_) => 11,
            TaskClientError::Http(he) if he.is_transport() => 20,
            TaskClientError::Http(_) => 30,
            TaskClientError::Convert(_) => 30,
        },
        CliError::Io(_) => 20,
        CliError::Anyhow(_) => 50,
    }
}
