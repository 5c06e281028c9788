use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::SolarCalcError;
use crate::input::FormInput;
use crate::SolarCalcResult;

/// Key under which the last-used form is remembered.
pub const LAST_INPUT_KEY: &str = "solar_calc_form";

/// String key-value persistence, the shape of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> SolarCalcResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> SolarCalcResult<()>;
    fn remove(&mut self, key: &str) -> SolarCalcResult<()>;
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> SolarCalcResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> SolarCalcResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SolarCalcResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File-backed
// ---------------------------------------------------------------------------

/// One `<key>.json` file per entry under a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> SolarCalcResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(SolarCalcError::Store {
                key: key.to_string(),
                reason: "keys may only contain ASCII letters, digits, '_' and '-'".into(),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> SolarCalcResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SolarCalcError::Store {
                key: key.to_string(),
                reason: format!("failed to read '{}': {e}", path.display()),
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> SolarCalcResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, value).map_err(|e| SolarCalcError::Store {
            key: key.to_string(),
            reason: format!("failed to write '{}': {e}", path.display()),
        })?;
        debug!(path = %path.display(), "stored value");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SolarCalcResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Last-used form
// ---------------------------------------------------------------------------

/// The remembered form, if any. A corrupt entry is logged and treated as
/// absent so the caller falls back to defaults.
pub fn load_last_input(store: &impl KeyValueStore) -> SolarCalcResult<Option<FormInput>> {
    let Some(raw) = store.get(LAST_INPUT_KEY)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(form) => Ok(Some(form)),
        Err(e) => {
            warn!(error = %e, "ignoring unreadable saved form");
            Ok(None)
        }
    }
}

pub fn save_last_input(store: &mut impl KeyValueStore, form: &FormInput) -> SolarCalcResult<()> {
    let json = serde_json::to_string(form)?;
    store.set(LAST_INPUT_KEY, &json)
}
