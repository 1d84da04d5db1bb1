use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Name of the database file inside the data directory.
pub const DB_FILE: &str = "tasks.db";

/// Get the duely directory - checks for a local .duely first, then falls
/// back to the global ~/.duely.
pub fn get_data_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir()?;
    if let Some(local_dir) = find_local_dir(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir()
        .ok_or_else(|| Error::Other("Could not determine home directory".to_string()))?;
    Ok(home.join(".duely"))
}

/// Find a local .duely directory by walking up the directory tree.
fn find_local_dir(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let data_dir = current.join(".duely");
        if data_dir.exists() && data_dir.is_dir() {
            return Some(data_dir);
        }

        current = current.parent()?;
    }
}

/// Ensure the data directory exists.
pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = get_data_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

/// Initialize a local .duely directory in the current directory.
pub fn init_local_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir()?;
    let data_dir = current_dir.join(".duely");

    if data_dir.exists() {
        return Err(Error::Other(format!(
            "Data directory already exists: {}",
            data_dir.display()
        )));
    }

    fs::create_dir_all(&data_dir)?;
    Ok(data_dir)
}

/// Path of the task database.
pub fn db_path() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join(DB_FILE))
}
