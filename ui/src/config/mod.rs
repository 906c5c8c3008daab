use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub mod app;
pub mod limits;
pub mod validation;

pub use app::AppConfig;
pub use validation::{ConfigLoadResult, ConfigValidationError};

/// Prefix of the environment variables that override file values,
/// e.g. `CHATLIST_LOCAL_USER_ID` or `CHATLIST_LOGGING__LEVEL`.
pub const ENV_PREFIX: &str = "CHATLIST";

/// Name of the configuration file looked up in the working directory and in
/// the per-user configuration directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default log file used when `logging.file` is not configured.
pub const DEFAULT_LOG_FILE: &str = "chatlist.log";

/// Loads the configuration.
///
/// With an explicit `path`, that file is mandatory and is the only file
/// consulted. Otherwise the per-user `chatlist/config.toml` and then a
/// `config.toml` in the working directory are layered, both optional.
/// Environment variables override file values in either case.
pub fn load_config(path: Option<&Path>) -> ConfigLoadResult {
    dotenv::dotenv().ok();

    let mut builder = Config::builder();
    match path {
        Some(path) => {
            log::debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }
        None => {
            if let Some(user_file) = user_config_file() {
                builder = builder.add_source(File::from(user_file).required(false));
            }
            builder = builder.add_source(File::with_name(CONFIG_FILE_NAME).required(false));
        }
    }

    let env_source = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true);

    let config = match builder.add_source(env_source).build() {
        Ok(config) => config,
        Err(e) => {
            return ConfigLoadResult::LoadError(format!(
                "Configuration loading failed: {e}. Please check your config.toml file and environment variables."
            ));
        }
    };

    match config.try_deserialize::<AppConfig>() {
        Ok(app_config) => ConfigLoadResult::Success(Box::new(app_config)),
        Err(e) => ConfigLoadResult::DeserializeError(format!("Failed to deserialize config: {e}")),
    }
}

/// Location of the per-user configuration file, when the platform has one.
pub fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chatlist").join(CONFIG_FILE_NAME))
}

/// Logging configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> &str {
        self.file.as_deref().unwrap_or(DEFAULT_LOG_FILE)
    }
}
