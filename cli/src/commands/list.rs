use std::io::Write;

use task_manager_core::api::{pending_only, render_tasks, AppConfig, TaskSource};

use super::cli::{Args, OutputFormat};
use crate::error::CliError;

/// Command-line flags win over config file and environment values.
pub fn apply_args(cfg: &mut AppConfig, args: &Args) {
    if let Some(host) = &args.host {
        cfg.backend.host = host.clone();
    }
    if let Some(port) = args.port {
        cfg.backend.port = port;
    }
    if let Some(url) = &args.base_url {
        cfg.backend.base_url = Some(url.clone());
    }
    if let Some(ms) = args.timeout_ms {
        cfg.backend.timeout_ms = ms;
    }
}

#[tracing::instrument(name = "cli.list", skip_all, fields(source = source.name()))]
pub async fn run_list<W: Write>(
    source: &dyn TaskSource,
    args: &Args,
    out: &mut W,
) -> Result<i32, CliError> {
    let fetched = source.fetch_tasks().await?;
    tracing::info!(tasks = fetched.len(), "task list fetched");

    let tasks = if args.pending {
        pending_only(&fetched)
    } else {
        fetched
    };

    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &tasks)
                .map_err(|e| CliError::Anyhow(e.into()))?;
            writeln!(out)?;
        }
        OutputFormat::Text if tasks.is_empty() => writeln!(out, "No tasks.")?,
        OutputFormat::Text => out.write_all(render_tasks(&tasks).as_bytes())?,
    }
    out.flush()?;
    Ok(0)
}
