use const_format::concatcp;
use thiserror::Error;

pub mod config;
pub mod database;
pub mod descriptor;
mod data_manager;
mod seed;

pub use data_manager::*;

pub const DATA_DIR: &str = "data/";
pub const DATABASE_PATH: &str = concatcp!(DATA_DIR, "kayak_trips.db");

#[derive(Debug, Error)]
pub enum DataManagerError {
    #[error("Malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid trip data: {0}")]
    Validation(String),

    #[error("Trip {trip_id} does not exist")]
    NotFound { trip_id: i64 },

    #[error("{context}: {source}")]
    Database {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

impl DataManagerError {
    pub(crate) fn database(context: &'static str, source: sqlx::Error) -> Self {
        Self::Database { context, source }
    }
}
