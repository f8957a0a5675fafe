use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Overrides the data directory when set
pub const DATA_DIR_ENV: &str = "TRUTHLENS_DATA_DIR";

pub struct PortablePathManager;

impl PortablePathManager {
    /// Root directory of the installation (the folder holding the executable).
    pub fn root_dir() -> PathBuf {
        match std::env::current_exe() {
            Ok(mut path) => {
                path.pop();
                if cfg!(debug_assertions) {
                    // target/debug -> workspace root, then into apps/core when it exists
                    path.pop();
                    path.pop();
                    let core_path = path.join("apps").join("core");
                    if core_path.exists() {
                        return core_path;
                    }
                }
                path
            }
            Err(e) => {
                warn!(
                    "Failed to get current exe path: {}. Falling back to current_dir.",
                    e
                );
                std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
            }
        }
    }

    /// Main data directory (`./data`, or `TRUTHLENS_DATA_DIR`).
    pub fn data_dir() -> PathBuf {
        match std::env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => Self::root_dir().join("data"),
        }
    }

    /// History database directory (`./data/db`).
    pub fn db_dir() -> PathBuf {
        Self::data_dir().join("db")
    }

    /// Default history database file.
    pub fn default_db_path() -> PathBuf {
        Self::db_dir().join("truthlens.sqlite")
    }

    /// Creates the data and db directories if they don't exist.
    pub fn init() -> Result<(), std::io::Error> {
        for dir in [Self::data_dir(), Self::db_dir()] {
            if !dir.exists() {
                info!("Creating directory: {:?}", dir);
                fs::create_dir_all(&dir)?;
            }
        }
        Ok(())
    }
}
