//! Platform glue: settings and storage backend selection, and browser capabilities reached through
//! `document::eval` (confirmation dialog, print).

use dioxus::prelude::*;
use tracing::warn;
#[cfg(not(target_arch = "wasm32"))]
use tracing::info;

use super::config::AppConfig;
use super::storage::{MemoryStore, RecordStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Desktop,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Desktop
        }
    }
}

/// Opens the persistent slot for this platform. When it can't be opened (private browsing
/// with storage disabled, no home directory, ...) observations are kept in memory for the
/// session and a warning is logged.
pub fn default_store(config: &AppConfig) -> Box<dyn RecordStore> {
    #[cfg(target_arch = "wasm32")]
    let opened = super::storage::BrowserStore::open(config.storage_key.as_str());

    #[cfg(not(target_arch = "wasm32"))]
    let opened = super::storage::FileStore::in_data_dir(&config.storage_key);

    match opened {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!(platform = ?Platform::current(), %err, "falling back to in-memory storage");
            Box::new(MemoryStore::new())
        }
    }
}

/// Settings for this session, read from `config.json` in the per-user config directory.
/// A missing, unreadable or invalid file falls back to the defaults.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_config() -> AppConfig {
    let Some(dirs) = directories::ProjectDirs::from("com", "Classlog", "Classlog") else {
        return AppConfig::default();
    };
    let path = dirs.config_dir().join("config.json");
    match AppConfig::load_from(&path) {
        Ok(Some(config)) => {
            info!(path = %path.display(), "configuration loaded");
            config.or_default_if_invalid()
        }
        Ok(None) => AppConfig::default(),
        Err(err) => {
            warn!(path = %path.display(), %err, "ignoring configuration file");
            AppConfig::default()
        }
    }
}

/// The browser build has no settings file.
#[cfg(target_arch = "wasm32")]
pub fn load_config() -> AppConfig {
    AppConfig::default()
}

/// Shows the host's confirmation dialog. Anything other than an explicit "OK" counts as a no.
pub async fn confirm(message: &str) -> bool {
    let Ok(quoted) = serde_json::to_string(message) else {
        return false;
    };
    match document::eval(&format!("return window.confirm({quoted});")).await {
        Ok(answer) => answer.as_bool().unwrap_or(false),
        Err(err) => {
            warn!(?err, "confirmation dialog unavailable");
            false
        }
    }
}

pub async fn print() {
    if let Err(err) = document::eval("window.print();").await {
        warn!(?err, "print dialog unavailable");
    }
}
