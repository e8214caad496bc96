//! # Preferences
//!
//! The one piece of state that survives sessions: the dark-mode flag,
//! stored as JSON at `~/.charla/prefs.json`. Writes use atomic rename
//! (write `.tmp`, then `rename()`) for crash safety. A missing or broken
//! file falls back to defaults with a logged warning.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prefs {
    #[serde(default)]
    pub dark_mode: bool,
}

/// Returns the path to `~/.charla/prefs.json`.
pub fn prefs_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".charla").join("prefs.json"))
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

pub fn load_from(path: &Path) -> Prefs {
    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!("Malformed prefs file {}: {e}", path.display());
                Prefs::default()
            }
        },
        Err(_) => Prefs::default(),
    }
}

pub fn save_to(path: &Path, prefs: &Prefs) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    atomic_write_json(path, prefs)
}

/// Loads preferences from the default location, or defaults.
pub fn load() -> Prefs {
    match prefs_path() {
        Some(path) => load_from(&path),
        None => {
            warn!("Could not determine home directory, using default prefs");
            Prefs::default()
        }
    }
}

/// Persists preferences to the default location. Failures are logged, never
/// fatal.
pub fn save(prefs: &Prefs) {
    let Some(path) = prefs_path() else {
        warn!("Could not determine home directory, prefs not saved");
        return;
    };
    match save_to(&path, prefs) {
        Ok(()) => info!("Saved prefs to {}", path.display()),
        Err(e) => warn!("Failed to save prefs: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let prefs = Prefs { dark_mode: true };
        save_to(&path, &prefs).unwrap();
        assert_eq!(load_from(&path), prefs);
        // No leftover tmp file after the rename.
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = load_from(&dir.path().join("nope.json"));
        assert!(!prefs.dark_mode);
    }

    #[test]
    fn test_malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(load_from(&path), Prefs::default());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        save_to(&path, &Prefs::default()).unwrap();
        assert!(path.exists());
    }
}
