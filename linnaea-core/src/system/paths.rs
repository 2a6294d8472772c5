use std::path::PathBuf;
use std::sync::OnceLock;

// Cache the paths to avoid repeated environment lookups
static LINNAEA_HOME: OnceLock<PathBuf> = OnceLock::new();
static LINNAEA_TARGET_DIR: OnceLock<PathBuf> = OnceLock::new();
static LINNAEA_TMP_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Generate the timestamp suffix used when backing up an existing
/// target directory, e.g. `2014-03-01_14-05-59` (local time).
pub fn backup_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string()
}

/// Get the Linnaea home directory
/// Checks LINNAEA_HOME environment variable, falls back to ${HOME}/.linnaea
pub fn linnaea_home() -> PathBuf {
    LINNAEA_HOME
        .get_or_init(|| {
            if let Ok(path) = std::env::var("LINNAEA_HOME") {
                PathBuf::from(path)
            } else {
                let home = std::env::var("HOME").unwrap_or_else(|_| {
                    std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string())
                });
                PathBuf::from(home).join(".linnaea")
            }
        })
        .clone()
}

/// Default target directory for the name-matching index
/// Checks LINNAEA_TARGET_DIR environment variable, falls back to LINNAEA_HOME/namematching
pub fn default_target_dir() -> PathBuf {
    LINNAEA_TARGET_DIR
        .get_or_init(|| {
            if let Ok(path) = std::env::var("LINNAEA_TARGET_DIR") {
                PathBuf::from(path)
            } else {
                linnaea_home().join("namematching")
            }
        })
        .clone()
}

/// Default directory for the temporary loading index
/// Checks LINNAEA_TMP_DIR environment variable, falls back to LINNAEA_HOME/nmload-tmp
pub fn default_tmp_dir() -> PathBuf {
    LINNAEA_TMP_DIR
        .get_or_init(|| {
            if let Ok(path) = std::env::var("LINNAEA_TMP_DIR") {
                PathBuf::from(path)
            } else {
                linnaea_home().join("nmload-tmp")
            }
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_timestamp_shape() {
        let ts = backup_timestamp();
        // YYYY-MM-DD_HH-MM-SS
        assert_eq!(ts.len(), 19);
        assert_eq!(ts.as_bytes()[10], b'_');
        assert!(ts.chars().all(|c| c.is_ascii_digit() || c == '-' || c == '_'));
    }

    #[test]
    fn test_default_dirs_are_under_home() {
        let home = linnaea_home();
        assert!(default_target_dir().starts_with(&home) || std::env::var("LINNAEA_TARGET_DIR").is_ok());
        assert!(default_tmp_dir().starts_with(&home) || std::env::var("LINNAEA_TMP_DIR").is_ok());
    }
}
