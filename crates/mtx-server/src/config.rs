use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use mtx_store::IngestConfig;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Root directory for the filesystem table store. `None` keeps tables
    /// in memory.
    pub tables_root: Option<PathBuf>,
    /// Identities granted the ownership bypass.
    pub superusers: Vec<String>,
    #[serde(default)]
    pub ingest: IngestConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8086".parse().expect("static addr"),
            tables_root: None,
            superusers: Vec::new(),
            ingest: IngestConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Parse a TOML config document.
    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}
