use std::path::{Path, PathBuf};

use super::types::AppConfig;

pub const ENV_HOST: &str = "TASK_MANAGER_HOST";
pub const ENV_BASE_URL: &str = "TASK_MANAGER_BASE_URL";

/// Default data directory, `~/.task-manager`. `None` when the platform
/// reports no home directory.
pub fn get_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".task-manager"))
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))?;
    Ok(cfg)
}

/// First config found wins: `<data_dir>/config.toml`, then `local_config`,
/// then built-in defaults. Without a data directory only the local file is
/// consulted and logs fall back to the OS temp dir.
fn load_from_locations(
    data_dir: Option<&Path>,
    local_config: &Path,
) -> anyhow::Result<AppConfig> {
    let user_config = data_dir
        .map(|dir| dir.join("config.toml"))
        .filter(|path| path.exists());

    let mut cfg = if let Some(path) = user_config {
        load_from_path(&path)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    let directory_unset = cfg
        .logging
        .directory
        .as_deref()
        .map(|s| s.trim().is_empty())
        .unwrap_or(true);
    if directory_unset {
        cfg.logging.directory =
            data_dir.map(|dir| dir.join("logs").to_string_lossy().to_string());
    }
    Ok(cfg)
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    let data_dir = get_data_dir();
    let mut cfg = load_from_locations(data_dir.as_deref(), Path::new("config.toml"))?;
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    Ok(cfg)
}

/// Environment overrides win over file values. Blank values are ignored.
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_blank(ENV_HOST) {
        cfg.backend.host = v;
    }
    if let Some(v) = non_blank(ENV_BASE_URL) {
        cfg.backend.base_url = Some(v);
    }
}
