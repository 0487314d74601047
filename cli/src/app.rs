//! Wires config, logging and the HTTP client together for one `tasks` run.
use std::io::Write;

use task_manager_core::api::{self as core_api, AppConfig, TaskClient};

use crate::commands::cli::Args;
use crate::commands::list;
use crate::error::CliError;
use crate::logging::init_tracing;

pub fn load_config(args: &Args) -> Result<AppConfig, CliError> {
    let mut cfg = match &args.config {
        Some(path) => {
            let mut cfg =
                core_api::load_from_path(path).map_err(|e| CliError::Config(e.to_string()))?;
            core_api::apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
            cfg
        }
        None => core_api::load_default().map_err(|e| CliError::Config(e.to_string()))?,
    };
    list::apply_args(&mut cfg, args);
    Ok(cfg)
}

pub async fn run_app<W: Write>(args: Args, out: &mut W) -> Result<i32, CliError> {
    let cfg = load_config(&args)?;
    init_tracing(&cfg.logging)?;

    let client = TaskClient::from_config(&cfg.backend)?;
    tracing::debug!(url = %client.tasks_url(), "client ready");

    list::run_list(&client, &args, out).await
}
