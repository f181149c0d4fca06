//! Platform-specific paths for persisted options.
//!
//! # Directory Structure
//!
//! - **User config**: `~/.config/optsmith/` (Linux), `~/Library/Application Support/optsmith/` (macOS), `%APPDATA%\optsmith\` (Windows)
//! - **Stored options**: `<user config>/options/`, one `<storage key>.json` file per plugin
//!
//! # Example
//!
//! ```rust,no_run
//! use optsmith_config::paths;
//!
//! let dir = paths::user_storage_dir();
//! let file = paths::storage_file(&dir, "optionsplugin-options");
//! println!("Options stored at: {:?}", file);
//! ```

use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "optsmith";

/// Subdirectory name for stored option blobs.
const STORAGE_SUBDIR: &str = "options";

/// File extension of stored option blobs.
const STORAGE_EXTENSION: &str = "json";

/// Returns the user-specific configuration directory.
///
/// # Platform Paths
///
/// - Linux: `~/.config/optsmith/`
/// - macOS: `~/Library/Application Support/optsmith/`
/// - Windows: `%APPDATA%\optsmith\`
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the directory where [`FileStorage::user_default`](crate::FileStorage::user_default)
/// keeps option blobs.
pub fn user_storage_dir() -> PathBuf {
    user_config_dir().join(STORAGE_SUBDIR)
}

/// Path of the blob stored under `key` inside `dir`.
///
/// Does not validate the key; see [`is_valid_storage_key`].
pub fn storage_file(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.{STORAGE_EXTENSION}"))
}

/// Whether `key` names a single file inside the storage directory.
///
/// Rejects empty keys, `.` and `..`, path separators and NUL bytes.
pub fn is_valid_storage_key(key: &str) -> bool {
    !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_config_dir() {
        let dir = user_config_dir();
        assert!(dir.ends_with(APP_NAME));
    }

    #[test]
    fn test_user_storage_dir() {
        let dir = user_storage_dir();
        assert!(dir.ends_with(STORAGE_SUBDIR));
        assert!(dir.starts_with(user_config_dir()));
    }

    #[test]
    fn test_storage_file_appends_extension() {
        let path = storage_file(Path::new("/tmp/opts"), "delay-options");
        assert_eq!(path, PathBuf::from("/tmp/opts/delay-options.json"));
    }

    #[test]
    fn test_valid_storage_keys() {
        assert!(is_valid_storage_key("optionsplugin-options"));
        assert!(is_valid_storage_key("a_b-c.v2"));
    }

    #[test]
    fn test_invalid_storage_keys() {
        for key in ["", ".", "..", "../escape", "a/b", "a\\b", "nul\0"] {
            assert!(!is_valid_storage_key(key), "{key:?} should be rejected");
        }
    }
}
