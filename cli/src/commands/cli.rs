use clap::Parser;
use std::path::PathBuf;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "tasks", version, about = "List tasks from a task-manager backend")]
pub struct Args {
    /// Backend host; the request goes to http://<host>:<port>/tasks.
    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Full backend URL. Takes precedence over --host and --port.
    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Read this config file instead of the default locations.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Hide completed tasks and their subtasks.
    #[arg(long)]
    pub pending: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["tasks"]).unwrap();
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.pending);
        assert!(args.host.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "tasks",
            "--host",
            "nas.local",
            "--port",
            "4100",
            "--format",
            "json",
            "--pending",
        ])
        .unwrap();
        assert_eq!(args.host.as_deref(), Some("nas.local"));
        assert_eq!(args.port, Some(4100));
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.pending);
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Args::try_parse_from(["tasks", "--port", "99999"]).is_err());
    }
}
