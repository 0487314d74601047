mod load;
mod types;

pub use load::{
    apply_env_overrides, get_data_dir, load_default, load_from_path, ENV_BASE_URL, ENV_HOST,
};
pub use types::{AppConfig, BackendConfig, LoggingConfig};
