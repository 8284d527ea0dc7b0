use std::{net::SocketAddr, path::PathBuf};

use kayak_trips_data_management::{
    config::{layered_config, DatabaseConfig},
    DataManagerError,
};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServerConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: HttpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
    /// Directory holding the map UI, served for any unknown path.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
    /// Also write logs (without colors) to this file.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: None,
            log_file: None,
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

impl ServerConfig {
    /// Same sources as the CLI: `config/default`, then `KAYAK__*` variables.
    pub fn load() -> Result<Self, DataManagerError> {
        Ok(layered_config()?.try_deserialize()?)
    }
}
