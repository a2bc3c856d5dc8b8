//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use dukascan_infra::{InMemoryTable, JsonFileTable, ProductTable, TableError};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_SHEET_NAME: &str = "Products";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DUKASCAN_BIND_ADDR is not a socket address: {0:?}")]
    InvalidBindAddr(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub sheet_name: String,
    /// JSON file backing the table; in-memory when unset.
    pub table_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Read `DUKASCAN_BIND_ADDR`, `DUKASCAN_SHEET_NAME` and `DUKASCAN_TABLE_PATH`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind = lookup("DUKASCAN_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(bind.clone()))?;

        let sheet_name = lookup("DUKASCAN_SHEET_NAME")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string());

        let table_path = lookup("DUKASCAN_TABLE_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            sheet_name,
            table_path,
        })
    }

    /// Open the configured table.
    pub fn open_table(&self) -> Result<Arc<dyn ProductTable>, TableError> {
        match &self.table_path {
            Some(path) => {
                tracing::info!("using file-backed table at {}", path.display());
                Ok(Arc::new(JsonFileTable::open(self.sheet_name.clone(), path.clone())?))
            }
            None => {
                tracing::warn!("DUKASCAN_TABLE_PATH not set; rows are kept in memory only");
                Ok(Arc::new(InMemoryTable::new(self.sheet_name.clone())))
            }
        }
    }
}
