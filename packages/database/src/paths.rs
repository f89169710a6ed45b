//! Canonical file paths for the loader's data directory.
//!
//! Paths are relative to the working directory the binaries run from.

use std::path::Path;

/// Default path for the `SQLite` document store.
pub const DEFAULT_DB_PATH: &str = "data/pokemons.db";

/// Ensures the parent directory of `path` exists, creating it if
/// necessary.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
