use cadence_core::query::DEFAULT_LIST_LIMIT;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Configuration file read from the working directory.
pub const CONFIG_FILE: &str = "cadence.toml";
/// Prefix of environment variables overriding the file, e.g. `CADENCE_DATABASE_PATH`.
pub const ENV_PREFIX: &str = "CADENCE_";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite database file
    pub database_path: String,
    /// Default number of tasks shown by `list`
    pub list_limit: u32,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "scheduler.db".to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}
