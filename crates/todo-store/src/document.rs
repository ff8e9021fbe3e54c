// SPDX-License-Identifier: Apache-2.0

use crate::{StoreError, StoreErrorCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where a loaded document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    File,
    Missing,
    Corrupt,
}

impl LoadOutcome {
    #[must_use]
    pub const fn used_fallback(self) -> bool {
        !matches!(self, Self::File)
    }
}

/// Reads a JSON document, substituting `fallback` when the file is absent
/// or does not parse. Never fails.
pub fn load_document<T: DeserializeOwned>(path: &Path, fallback: T) -> (T, LoadOutcome) {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "document unreadable; using fallback");
                return (fallback, LoadOutcome::Corrupt);
            }
            return (fallback, LoadOutcome::Missing);
        }
    };
    match serde_json::from_slice::<T>(&raw) {
        Ok(value) => (value, LoadOutcome::File),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "document failed to parse; using fallback");
            (fallback, LoadOutcome::Corrupt)
        }
    }
}

/// Rewrites the whole document: pretty JSON into `<file>.tmp`, fsync, rename
/// over the target, fsync the directory.
pub fn save_document<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|e| StoreError::new(StoreErrorCode::Serialize, e.to_string()))?;
    let tmp = tmp_path(path);
    write_and_sync(&tmp, &bytes)?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        io_error(path, &e)
    })?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        sync_dir(dir)?;
    }
    debug!(path = %path.display(), bytes = bytes.len(), "document written");
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("document"), OsString::from);
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut file = File::create(path).map_err(|e| io_error(path, &e))?;
    file.write_all(bytes).map_err(|e| io_error(path, &e))?;
    file.sync_all().map_err(|e| io_error(path, &e))
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<(), StoreError> {
    let f = File::open(dir).map_err(|e| io_error(dir, &e))?;
    f.sync_all().map_err(|e| io_error(dir, &e))
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<(), StoreError> {
    Ok(())
}

fn io_error(path: &Path, err: &std::io::Error) -> StoreError {
    StoreError::new(StoreErrorCode::Io, format!("{}: {err}", path.display()))
}
