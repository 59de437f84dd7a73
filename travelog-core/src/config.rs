use figment::{Figment, providers::{Env, Format, Yaml}};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    /// Allowed cross-origin source. None = allow any origin.
    #[serde(default)]
    pub cors_origin: Option<String>,
}

/// Document store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON state file the collection is persisted to.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
    #[serde(default = "default_collection")]
    pub collection: String,
}

// ── Defaults ──────────────────────────────────────────────────

fn default_addr() -> String { "0.0.0.0:1337".into() }
fn default_state_file() -> PathBuf { "data/travelog-state.json".into() }
fn default_collection() -> String { "log_entries".into() }

// ── Impls ─────────────────────────────────────────────────────

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            cors_origin: None,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            collection: default_collection(),
        }
    }
}

impl AppConfig {
    /// Load configuration from YAML file + env overrides.
    ///
    /// Env keys separate sections with a double underscore so field names
    /// containing `_` stay addressable, e.g. `TRAVELOG_SERVER__CORS_ORIGIN`
    /// maps to `server.cors_origin`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config: AppConfig = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("TRAVELOG_").split("__"))
            .extract()?;
        Ok(config)
    }
}
