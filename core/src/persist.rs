//! Palette State Persistence
//!
//! The current palette's share code is written to a small state file
//! under the XDG config dir so a later session restores where the last
//! one left off. Writes go through a temp file and rename, so a crash
//! mid-save never leaves a truncated code behind.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::palette::Palette;
use crate::parameter::ShareCodeError;

/// State file name under the config directory
const STATE_FILE: &str = "palette";

/// Errors that can occur while saving or restoring palette state
#[derive(Debug, Error)]
pub enum PersistError {
    /// Failed to read or write the state file
    #[error("Failed to access state file at {path}: {source}")]
    Io {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// The state file held a malformed share code
    #[error("Corrupt state file at {path}: {source}")]
    Corrupt {
        /// The path that was read
        path: PathBuf,
        /// The decode failure
        source: ShareCodeError,
    },
}

/// Get the default state file path
///
/// Returns `$XDG_CONFIG_HOME/cospal/palette` or `~/.config/cospal/palette`
/// if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_state_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("cospal").join(STATE_FILE))
}

/// Restore a palette from the state file at `path`.
///
/// Returns `Ok(None)` when no state file exists yet.
///
/// # Errors
///
/// Returns [`PersistError::Io`] when the file exists but cannot be
/// read, and [`PersistError::Corrupt`] when its contents do not decode
/// as a share code.
pub fn load_palette(path: &Path) -> Result<Option<Palette>, PersistError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No saved palette");
        return Ok(None);
    }

    let code = std::fs::read_to_string(path).map_err(|e| PersistError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let palette = Palette::from_share(code.trim()).map_err(|e| PersistError::Corrupt {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), "Restored palette from state file");
    Ok(Some(palette))
}

/// Save a palette's share code to the state file at `path`.
///
/// Creates parent directories as needed. The code is written to a
/// sibling temp file first and renamed into place.
///
/// # Errors
///
/// Returns [`PersistError::Io`] when any filesystem step fails.
pub fn save_palette(path: &Path, palette: &Palette) -> Result<(), PersistError> {
    let io_err = |e: std::io::Error| PersistError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, palette.to_share()).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)?;

    tracing::debug!(path = %path.display(), "Saved palette state");
    Ok(())
}
