//! Local persistence for the observation collection.
//!
//! The whole collection lives in one slot as a JSON array and is always replaced as a unit.
//! Backends only know how to read, write and remove that raw slot; encoding and the
//! well-formedness checks live in the provided [`RecordStore`] methods so every backend
//! reports corrupt data the same way.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::error::StoreError;
use super::model::Observation;

pub trait RecordStore {
    /// Raw slot contents, `None` when nothing has been persisted yet.
    fn read_slot(&self) -> Result<Option<String>, StoreError>;

    /// Replaces the slot in a single write.
    fn write_slot(&mut self, payload: &str) -> Result<(), StoreError>;

    /// Removes the slot. Removing an absent slot is not an error.
    fn remove_slot(&mut self) -> Result<(), StoreError>;

    /// Full ordered collection; empty when nothing is persisted.
    fn load(&self) -> Result<Vec<Observation>, StoreError> {
        match self.read_slot()? {
            Some(raw) => decode(&raw),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, records: &[Observation]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(records)
            .map_err(|err| StoreError::Persistence(err.to_string()))?;
        self.write_slot(&payload).inspect_err(|err| {
            warn!(records = records.len(), %err, "failed to persist observations");
        })?;
        debug!(records = records.len(), bytes = payload.len(), "observations saved");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.remove_slot()
    }
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn read_slot(&self) -> Result<Option<String>, StoreError> {
        (**self).read_slot()
    }

    fn write_slot(&mut self, payload: &str) -> Result<(), StoreError> {
        (**self).write_slot(payload)
    }

    fn remove_slot(&mut self) -> Result<(), StoreError> {
        (**self).remove_slot()
    }
}

fn decode(raw: &str) -> Result<Vec<Observation>, StoreError> {
    let records: Vec<Observation> =
        serde_json::from_str(raw).map_err(|err| StoreError::Corrupt(err.to_string()))?;

    if let Some(bad) = records.iter().find(|obs| !obs.is_complete()) {
        return Err(StoreError::Corrupt(format!(
            "observation {} is missing required fields",
            bad.id
        )));
    }

    let mut seen = HashSet::with_capacity(records.len());
    if let Some(dup) = records.iter().find(|obs| !seen.insert(obs.id)) {
        return Err(StoreError::Corrupt(format!("duplicate observation id {}", dup.id)));
    }

    Ok(records)
}

/// In-process slot, used by tests and as a fallback when no platform storage is reachable.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slot: Option<String>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an arbitrary slot value, e.g. data left behind by another build.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Some(raw.into()),
            quota_bytes: None,
        }
    }

    /// Rejects writes larger than `bytes`, mimicking an exhausted storage quota.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    pub fn raw(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl RecordStore for MemoryStore {
    fn read_slot(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot.clone())
    }

    fn write_slot(&mut self, payload: &str) -> Result<(), StoreError> {
        if let Some(quota) = self.quota_bytes {
            if payload.len() > quota {
                return Err(StoreError::Persistence(format!(
                    "quota of {quota} bytes exceeded ({} bytes)",
                    payload.len()
                )));
            }
        }
        self.slot = Some(payload.to_string());
        Ok(())
    }

    fn remove_slot(&mut self) -> Result<(), StoreError> {
        self.slot = None;
        Ok(())
    }
}

/// `window.localStorage` slot.
#[cfg(target_arch = "wasm32")]
pub struct BrowserStore {
    key: String,
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl BrowserStore {
    pub fn open(key: impl Into<String>) -> Result<Self, StoreError> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Unavailable("window unavailable".into()))?;
        let storage = window
            .local_storage()
            .map_err(|err| StoreError::Unavailable(format!("{err:?}")))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".into()))?;
        Ok(Self {
            key: key.into(),
            storage,
        })
    }
}

#[cfg(target_arch = "wasm32")]
impl RecordStore for BrowserStore {
    fn read_slot(&self) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(&self.key)
            .map_err(|err| StoreError::Unavailable(format!("{err:?}")))
    }

    fn write_slot(&mut self, payload: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(&self.key, payload)
            .map_err(|err| StoreError::Persistence(format!("{err:?}")))
    }

    fn remove_slot(&mut self) -> Result<(), StoreError> {
        self.storage
            .remove_item(&self.key)
            .map_err(|err| StoreError::Persistence(format!("{err:?}")))
    }
}

/// JSON file slot for desktop builds. Writes go to a sibling temp file first and are then
/// renamed over the slot, so a failed write never leaves a half-written collection.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/<key>.json` under the platform's per-user application data directory.
    pub fn in_data_dir(key: &str) -> Result<Self, StoreError> {
        let dirs = directories::ProjectDirs::from("com", "Classlog", "Classlog").ok_or_else(
            || StoreError::Unavailable("unable to determine data directory".into()),
        )?;
        Ok(Self::new(dirs.data_dir().join(format!("{key}.json"))))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl RecordStore for FileStore {
    fn read_slot(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) if err.kind() == std::io::ErrorKind::InvalidData => {
                Err(StoreError::Corrupt(err.to_string()))
            }
            Err(err) => Err(StoreError::Unavailable(err.to_string())),
        }
    }

    fn write_slot(&mut self, payload: &str) -> Result<(), StoreError> {
        use std::io::Write;

        let persist = |err: std::io::Error| StoreError::Persistence(err.to_string());

        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(persist)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let replace = || -> std::io::Result<()> {
            let mut file = std::fs::File::create(&tmp)?;
            file.write_all(payload.as_bytes())?;
            file.sync_all()?;
            std::fs::rename(&tmp, &self.path)
        };

        replace().map_err(|err| {
            if let Err(cleanup) = std::fs::remove_file(&tmp) {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    debug!(path = %tmp.display(), %cleanup, "stale temp file left behind");
                }
            }
            persist(err)
        })
    }

    fn remove_slot(&mut self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Persistence(err.to_string())),
        }
    }
}
