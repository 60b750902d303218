//! Where Spark keeps its files
//!
//! Everything lives in one directory, ~/.config/spark/:
//! - config.toml - connected platforms, direct-post list, service URL
//! - history.json - the last 50 generations, newest first, rewritten whole
//!   on every change
//!
//! `Config::history_path` can point the history elsewhere; the config file
//! itself always stays here.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "spark";
const CONFIG_FILE: &str = "config.toml";
const HISTORY_FILE: &str = "history.json";

/// Spark directory under `home`, without touching the filesystem
fn spark_dir_in(home: &Path) -> PathBuf {
    home.join(".config").join(APP_DIR)
}

/// Get the Spark data directory (~/.config/spark/), creating it if needed
///
/// The same location is used on every platform so the history file is easy
/// to find, back up, or delete by hand.
pub fn spark_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let dir = spark_dir_in(&home);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir)
}

/// Get the config file path (~/.config/spark/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(spark_dir()?.join(CONFIG_FILE))
}

/// Default history file (~/.config/spark/history.json)
///
/// Sits next to config.toml so both are created by the same `spark_dir`
/// call; `HistoryStore::persist` then only has to write the file.
pub fn history_path() -> Result<PathBuf> {
    Ok(spark_dir()?.join(HISTORY_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_home() {
        let home = Path::new("/home/ada");
        let dir = spark_dir_in(home);
        assert_eq!(dir, Path::new("/home/ada/.config/spark"));
        assert_eq!(dir.join(HISTORY_FILE), Path::new("/home/ada/.config/spark/history.json"));
        assert_eq!(dir.join(CONFIG_FILE).parent(), dir.join(HISTORY_FILE).parent());
    }
}
