//! Atomic JSON file operations shared by the stores.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::{PersistenceError, Result};

/// Writes data to a file atomically.
///
/// Data goes to a temporary file in the target directory, which is then
/// renamed over the target, so readers see either the old or the new
/// contents. Missing parent directories are created.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    ensure_dir(dir)?;

    let write_err = |source| PersistenceError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    let mut temp_file = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    temp_file.write_all(data).map_err(write_err)?;
    temp_file.flush().map_err(write_err)?;
    temp_file.persist(path).map_err(|e| write_err(e.error))?;

    Ok(())
}

/// Serializes a value as pretty JSON and writes it atomically.
pub fn atomic_write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    atomic_write(path, json.as_bytes())
}

/// Reads and deserializes JSON from a file, returning `None` if it is absent.
pub fn read_json_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(PersistenceError::ReadError {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    Ok(Some(serde_json::from_str(&data)?))
}

/// Deletes a file. A missing file is not an error; returns whether a file
/// was removed.
pub fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(PersistenceError::WriteError {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Loads every `*.json` record in a directory.
///
/// Files that fail to parse are skipped with a warning so one corrupt
/// record does not hide the rest.
pub fn read_json_dir<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(PersistenceError::ReadError {
                path: dir.to_path_buf(),
                source,
            })
        }
    };

    let mut items = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| PersistenceError::ReadError {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "json") {
            continue;
        }
        match read_json_optional::<T>(&path) {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable record"),
        }
    }
    Ok(items)
}

/// Builds `dir/{id}.json`, rejecting ids that could escape `dir`.
pub fn record_path(dir: &Path, id: &str) -> Result<PathBuf> {
    Ok(dir.join(format!("{}.json", safe_segment(id)?)))
}

/// Checks that `id` is usable as a single path segment.
pub fn safe_segment(id: &str) -> Result<&str> {
    let safe = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if safe {
        Ok(id)
    } else {
        Err(PersistenceError::InvalidId(id.to_string()))
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| PersistenceError::DirectoryError {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
