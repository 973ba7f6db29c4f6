//! Persisted user preferences.
//!
//! The monitor keeps one durable preference today: the active display
//! language. It is stored as a `KEY=value` line in an env-style file under
//! the platform data root, updated read-modify-write so unrelated lines
//! survive.

use std::env;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

use crate::settings::SUPPORTED_LANGUAGES;

/// Key holding the display language preference.
const LANGUAGE_KEY: &str = "GRAMVOX_LANGUAGE";

/// Errors that can occur during preference persistence.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// Could not determine the system data directory.
    #[error("Cannot determine system data directory")]
    NoDataDir,

    /// Failed to create the data directory.
    #[error("Failed to create directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },

    /// Failed to read or write the preferences file.
    #[error("Failed to access preferences file {path}: {reason}")]
    FileError { path: PathBuf, reason: String },
}

/// Root directory for monitor data.
///
/// Resolution order:
/// 1. `GRAMVOX_DATA_DIR` environment variable (highest priority)
/// 2. System data directory (e.g. `~/.local/share/gramvox`)
pub fn data_root() -> Result<PathBuf, PrefsError> {
    // 1. Runtime override (tests and packaging use this)
    if let Ok(path) = env::var("GRAMVOX_DATA_DIR") {
        return Ok(PathBuf::from(path));
    }

    // 2. Default to system data directory
    let data_dir = dirs::data_local_dir().ok_or(PrefsError::NoDataDir)?;
    let root = data_dir.join("gramvox");

    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PrefsError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}

/// Location of the preferences file.
pub fn prefs_file_path() -> Result<PathBuf, PrefsError> {
    Ok(data_root()?.join(".env"))
}

/// Persist the display language preference.
pub fn persist_language(code: &str) -> Result<(), PrefsError> {
    persist_value(LANGUAGE_KEY, code)
}

/// Load the persisted display language, if a valid one exists.
///
/// Codes outside the supported set are treated as unset rather than
/// propagated; callers fall back to the default language.
pub fn load_language() -> Result<Option<String>, PrefsError> {
    Ok(read_value(LANGUAGE_KEY)?.filter(|code| SUPPORTED_LANGUAGES.contains(&code.as_str())))
}

/// Persist a key=value pair into the preferences file.
///
/// If the key already exists, its value is updated in place. Otherwise the
/// pair is appended.
fn persist_value(key: &str, value: &str) -> Result<(), PrefsError> {
    let path = prefs_file_path()?;

    let lines: Vec<String> = if path.exists() {
        fs::read_to_string(&path)
            .map_err(|e| PrefsError::FileError {
                path: path.clone(),
                reason: e.to_string(),
            })?
            .lines()
            .map(std::string::ToString::to_string)
            .collect()
    } else {
        Vec::new()
    };

    let mut updated = false;
    let mut output: Vec<String> = Vec::with_capacity(lines.len() + 1);

    for line in lines {
        match line.split_once('=') {
            Some((lhs, _)) if lhs.trim() == key => {
                if !updated {
                    output.push(format!("{key}={value}"));
                    updated = true;
                }
            }
            _ => output.push(line),
        }
    }

    if !updated {
        output.push(format!("{key}={value}"));
    }

    // Ensure file ends with newline
    if !output.is_empty() && !output.last().unwrap().is_empty() {
        output.push(String::new());
    }

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)
        .map_err(|e| PrefsError::FileError {
            path: path.clone(),
            reason: e.to_string(),
        })?;

    let content = output.join("\n");
    file.write_all(content.as_bytes())
        .map_err(|e| PrefsError::FileError {
            path,
            reason: e.to_string(),
        })?;

    Ok(())
}

/// Read a value back from the preferences file.
fn read_value(key: &str) -> Result<Option<String>, PrefsError> {
    let path = prefs_file_path()?;
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&path).map_err(|e| PrefsError::FileError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    for line in contents.lines() {
        if let Some((lhs, rhs)) = line.split_once('=') {
            if lhs.trim() == key {
                return Ok(Some(rhs.trim().to_string()));
            }
        }
    }

    Ok(None)
}
