//! Layered configuration: an optional `config/default` file, then
//! `KAYAK__*` environment variables (e.g. `KAYAK__DATABASE__PATH`).

use std::path::PathBuf;

use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::{DataManagerError, DATABASE_PATH};

pub const ENV_PREFIX: &str = "KAYAK";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// `data/kayak_trips.db` under the project root, or under the working
/// directory when no project root can be found.
pub fn default_database_path() -> PathBuf {
    project_root::get_project_root()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DATABASE_PATH)
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DataConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl DataConfig {
    pub fn load() -> Result<Self, DataManagerError> {
        Ok(layered_config()?.try_deserialize()?)
    }
}

/// The file and environment sources shared by every binary in the workspace.
pub fn layered_config() -> Result<Config, ConfigError> {
    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::config::FileFormat;

    fn from_toml(toml: &str) -> DataConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn reads_database_path() {
        let config = from_toml("[database]\npath = \"/tmp/trips.db\"\n");
        assert_eq!(config.database.path, PathBuf::from("/tmp/trips.db"));
    }

    #[test]
    fn missing_section_uses_default_path() {
        let config = from_toml("");
        assert_eq!(config.database, DatabaseConfig::default());
        assert!(config.database.path.ends_with("data/kayak_trips.db"));
    }
}
