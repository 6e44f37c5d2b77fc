//! XDG Base Directory paths for mathforce.
//!
//! The CLI keeps its configuration and its session data (history ledger,
//! weak-topic markers, last session aggregate) under XDG paths on every
//! platform, so a student's data lives in one predictable place.

use std::path::PathBuf;

const APP_DIR: &str = "mathforce";

/// Resolve `$<env_var>/mathforce`, falling back to `~/<home_relative>/mathforce`.
fn xdg_dir(env_var: &str, home_relative: &str) -> PathBuf {
    if let Ok(base) = std::env::var(env_var)
        && !base.is_empty()
    {
        return PathBuf::from(base).join(APP_DIR);
    }
    match dirs::home_dir() {
        Some(home) => home.join(home_relative).join(APP_DIR),
        None => PathBuf::from(home_relative).join(APP_DIR),
    }
}

/// Get the mathforce config directory.
///
/// Returns `$XDG_CONFIG_HOME/mathforce` if set, otherwise `~/.config/mathforce`.
///
/// # Examples
///
/// ```
/// use mathforce_paths::config_dir;
///
/// let config = config_dir();
/// let file = config.join("config.toml");
/// ```
pub fn config_dir() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// Get the mathforce data directory.
///
/// Returns `$XDG_DATA_HOME/mathforce` if set, otherwise `~/.local/share/mathforce`.
pub fn data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share")
}

/// Path of the user-level config file.
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Directory holding the persisted key-value records.
pub fn store_dir() -> PathBuf {
    data_dir().join("store")
}
