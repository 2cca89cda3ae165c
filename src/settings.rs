//! Persisted reticle settings
//!
//! The reticle is persisted as six named integers in a per-user store.
//! `SettingsStore` is the seam the reticle talks to; `JsonSettingsStore`
//! keeps the values in a JSON file inside the application data directory,
//! `MemoryStore` keeps them in-process, and `DetachedStore` stands in when
//! there is nowhere to persist to.

use crate::error::{OverlayError, Result};
use crate::reticle::ReticleConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const SHAPE_KEY: &str = "Shape";
pub const COLOR_KEY: &str = "Color";
pub const SIZE_KEY: &str = "Size";
pub const THICKNESS_KEY: &str = "Thickness";
pub const X_OFFSET_KEY: &str = "X-offset";
pub const Y_OFFSET_KEY: &str = "Y-offset";

/// Every persisted key, in write order
pub const ALL_KEYS: [&str; 6] = [
    SHAPE_KEY,
    COLOR_KEY,
    SIZE_KEY,
    THICKNESS_KEY,
    X_OFFSET_KEY,
    Y_OFFSET_KEY,
];

/// Key-value store for integer settings
pub trait SettingsStore {
    /// Value stored under `key`, if any
    fn load(&self, key: &str) -> Option<i32>;

    /// Store `value` under `key`; false when the write did not land
    fn save(&mut self, key: &str, value: i32) -> bool;

    /// Pick up changes made to the backing storage since it was opened
    fn reload(&mut self) -> Result<()> {
        Ok(())
    }
}

/// In-process store
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryStore {
    values: BTreeMap<String, i32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self, key: &str) -> Option<i32> {
        self.values.get(key).copied()
    }

    fn save(&mut self, key: &str, value: i32) -> bool {
        self.values.insert(key.to_string(), value);
        true
    }
}

/// Store for sessions without a settings location.
/// Nothing can be read back and nothing is persisted.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedStore;

impl SettingsStore for DetachedStore {
    fn load(&self, _key: &str) -> Option<i32> {
        None
    }

    fn save(&mut self, _key: &str, _value: i32) -> bool {
        false
    }

    fn reload(&mut self) -> Result<()> {
        Err(OverlayError::SettingsUnavailable)
    }
}

/// On-disk layout of the settings file.
/// Values stay untyped so one bad entry does not spoil the others.
#[derive(Serialize, Deserialize, Default, Debug)]
#[serde(transparent)]
struct SettingsFile {
    values: BTreeMap<String, Value>,
}

impl SettingsFile {
    fn get(&self, key: &str) -> Option<i32> {
        let value = self.values.get(key)?.as_i64()?;
        i32::try_from(value).ok()
    }
}

/// Store backed by a JSON file; every save writes the whole file
#[derive(Debug)]
pub struct JsonSettingsStore {
    path: PathBuf,
    file: SettingsFile,
}

impl JsonSettingsStore {
    /// Open an existing settings file, or create an empty one.
    /// The flag is true when the file did not exist before this call.
    pub fn open_or_create(path: impl Into<PathBuf>) -> Result<(Self, bool)> {
        let path = path.into();

        if path.exists() {
            return Ok((Self::open(path)?, false));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let store = Self {
            path,
            file: SettingsFile::default(),
        };
        store.write()?;
        tracing::info!("Created settings file: {}", store.path.display());

        Ok((store, true))
    }

    /// Store for a settings file that could not be read at startup.
    /// Nothing is loaded from it; the next save rewrites the file and the
    /// next reload tries reading it again.
    pub fn unloaded(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: SettingsFile::default(),
        }
    }

    /// Open an existing settings file
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = fs::read_to_string(&path)?;
        let file: SettingsFile = serde_json::from_str(&contents)?;

        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the file through a sibling temp file so an interrupted
    /// write never leaves it truncated
    fn write(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.file)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        Ok(())
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self, key: &str) -> Option<i32> {
        self.file.get(key)
    }

    fn save(&mut self, key: &str, value: i32) -> bool {
        self.file.values.insert(key.to_string(), Value::from(value));
        match self.write() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to write setting {}: {}", key, e);
                false
            }
        }
    }

    fn reload(&mut self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)?;
        self.file = serde_json::from_str(&contents)?;
        Ok(())
    }
}

/// Attach `reticle` to the settings file at `path`.
///
/// - First run: the file is created and the current (default) values are
///   written to it
/// - Existing file: its values are loaded into `reticle`
/// - Unreadable file: `reticle` is left alone; a later save rewrites the file
/// - No location: nothing is read or persisted this session
pub fn open_settings(
    path: Option<PathBuf>,
    reticle: &mut ReticleConfig,
) -> Box<dyn SettingsStore> {
    let Some(path) = path else {
        tracing::warn!("No settings location available; settings will not persist");
        return Box::new(DetachedStore);
    };

    match JsonSettingsStore::open_or_create(&path) {
        Ok((mut store, true)) => {
            if reticle.save_to(&mut store) {
                tracing::info!("Default settings written to {}", store.path().display());
            } else {
                tracing::warn!("Could not write default settings");
            }
            Box::new(store)
        }
        Ok((store, false)) => {
            reticle.load_from(&store);
            tracing::info!("Settings loaded from {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to open settings {}: {}; using defaults until the next save",
                path.display(),
                e
            );
            Box::new(JsonSettingsStore::unloaded(path))
        }
    }
}
