//! Where wordsmith keeps its files: `config.yaml` and the `logs/` directory
//! under `$XDG_CONFIG_HOME/wordsmith` (or `~/.config/wordsmith`), or
//! `%APPDATA%\wordsmith` on Windows.

use std::{env, fs, io, path::PathBuf};

const APP_DIR: &str = "wordsmith";

/// File name prefix of the daily-rotated log
pub const LOG_FILE_PREFIX: &str = "wordsmith.log";

fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let base = env::var_os("APPDATA").map(PathBuf::from);

    #[cfg(not(target_os = "windows"))]
    let base = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

    base.map(|dir| dir.join(APP_DIR))
}

/// The user config file read by `EngineConfig::load`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// Create the log directory if needed and return it
pub fn ensure_logs_dir() -> io::Result<PathBuf> {
    let logs = config_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no config directory available"))?
        .join("logs");
    fs::create_dir_all(&logs)?;
    Ok(logs)
}
