//! Storage layer for persistent key-value slots
//!
//! A slot is a single string value addressed by a fixed key. `FileStorage`
//! keeps one JSON file per key in a data directory; `MemoryStorage` keeps
//! values in a map for tests and ephemeral sessions.

use crate::config::app::NAME;
use crate::config::storage::{DATA_DIR_ENV, FILE_EXTENSION, MAX_KEY_LEN};
use crate::error::{LarderError, Result};
use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

/// A persistent key-value slot store
///
/// Implementations must return `Ok(None)` for a key that was never written.
pub trait Storage: Send {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

// =============================================================================
// Directory helpers
// =============================================================================

/// Get the default data directory path
///
/// `LARDER_DATA_DIR` wins when set and non-empty; otherwise the platform
/// data directory joined with the application name.
pub fn data_dir() -> Result<PathBuf> {
    resolve_data_dir(env::var_os(DATA_DIR_ENV), dirs::data_dir())
}

/// Pick the data directory from an override value and the platform default
fn resolve_data_dir(override_dir: Option<OsString>, platform_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    platform_dir
        .map(|p| p.join(NAME))
        .ok_or_else(|| LarderError::Storage(
            "Could not determine data directory. HOME environment variable may not be set.".to_string()
        ))
}

/// Create a directory if it doesn't exist, with proper error handling
fn create_dir_if_needed(path: &Path) -> Result<()> {
    match fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) => {
            let msg = match e.kind() {
                ErrorKind::PermissionDenied => {
                    format!("Permission denied: cannot create directory {:?}", path)
                }
                ErrorKind::NotFound => {
                    format!("Cannot create directory {:?}: parent path does not exist", path)
                }
                _ => {
                    format!("Failed to create directory {:?}: {}", path, e)
                }
            };
            Err(LarderError::Storage(msg))
        }
    }
}

/// Read file contents with proper error handling
///
/// Returns `None` if the file doesn't exist.
fn read_file(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) => match e.kind() {
            ErrorKind::NotFound => Ok(None),
            ErrorKind::PermissionDenied => Err(LarderError::Storage(format!(
                "Permission denied: cannot read {:?}",
                path
            ))),
            _ => Err(LarderError::Storage(format!(
                "Failed to read {:?}: {}",
                path, e
            ))),
        },
    }
}

/// Describe a failed write of `path`
fn write_error(path: &Path, e: &std::io::Error) -> LarderError {
    let msg = match e.kind() {
        ErrorKind::PermissionDenied => {
            format!("Permission denied: cannot write to {:?}", path)
        }
        ErrorKind::NotFound => {
            format!("Cannot write to {:?}: parent directory does not exist", path)
        }
        ErrorKind::ReadOnlyFilesystem => {
            format!("Cannot write to {:?}: filesystem is read-only", path)
        }
        ErrorKind::StorageFull => {
            format!("Cannot write to {:?}: no space left on device", path)
        }
        _ => {
            format!("Failed to write to {:?}: {}", path, e)
        }
    };
    LarderError::Storage(msg)
}

/// Sibling path to stage a write of `path` in
///
/// Unique per process and per call, and short enough to fit any key.
fn staging_path(path: &Path) -> PathBuf {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    let n = NEXT.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{}-{}.tmp", process::id(), n))
}

/// Replace file contents, writing to a sibling file first and renaming it
/// over the target so readers never observe a half-written value
fn write_file(path: &Path, content: &str) -> Result<()> {
    let staging = staging_path(path);

    if let Err(e) = fs::write(&staging, content) {
        let _ = fs::remove_file(&staging);
        return Err(write_error(&staging, &e));
    }

    fs::rename(&staging, path).map_err(|e| {
        let _ = fs::remove_file(&staging);
        write_error(path, &e)
    })
}

/// Check that a key is safe to use as a file name
///
/// Only ASCII alphanumerics, dashes, and underscores; rules out `..`,
/// separators, and anything that could escape the data directory. ASCII
/// only, so the character count is also the byte count of the file name.
fn is_safe_key(key: &str) -> bool {
    !key.is_empty()
        && key.chars().count() <= MAX_KEY_LEN
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

// =============================================================================
// FileStorage
// =============================================================================

/// Slots stored as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` for slot files. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Use the default data directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(data_dir()?))
    }

    /// Directory holding the slot files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn slot_path(&self, key: &str) -> Result<PathBuf> {
        if !is_safe_key(key) {
            return Err(LarderError::InvalidInput(format!(
                "Storage key must be 1-{} ASCII letters, digits, '-' or '_': {:?}",
                MAX_KEY_LEN,
                key
            )));
        }
        Ok(self.dir.join(format!("{}.{}", key, FILE_EXTENSION)))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        let content = read_file(&path)?;
        tracing::debug!(path = %path.display(), found = content.is_some(), "read slot");
        Ok(content)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        if !self.dir.as_os_str().is_empty() {
            create_dir_if_needed(&self.dir)?;
        }
        write_file(&path, value)?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote slot");
        Ok(())
    }
}

// =============================================================================
// MemoryStorage
// =============================================================================

/// Slots held in memory
///
/// `set_available(false)` makes every call fail, which models a backend
/// that is full or has gone away.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    available: bool,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            available: true,
            writes: 0,
        }
    }

    /// Start with `value` already stored under `key`
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(key.into(), value.into());
        self
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Raw value under `key`, bypassing availability
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    /// Number of successful writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if !self.available {
            return Err(LarderError::Storage(format!(
                "Storage unavailable: cannot read {:?}",
                key
            )));
        }
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if !self.available {
            return Err(LarderError::Storage(format!(
                "Storage unavailable: cannot write {:?}",
                key
            )));
        }
        self.slots.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
