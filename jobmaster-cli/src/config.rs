//! Database location resolution

use std::path::PathBuf;

const DB_ENV_VAR: &str = "JOBMASTER_DB";

/// Resolve the SQLite database path: `--db` flag, then `JOBMASTER_DB`, then
/// the platform data directory.
pub fn resolve_db_path(flag: Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    if let Ok(path) = std::env::var(DB_ENV_VAR) {
        return PathBuf::from(path);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jobmaster")
        .join("jobmaster.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_takes_precedence() {
        let path = resolve_db_path(Some(PathBuf::from("/tmp/explicit.db")));
        assert_eq!(path, PathBuf::from("/tmp/explicit.db"));
    }

    #[test]
    fn test_default_ends_with_db_name() {
        if std::env::var(DB_ENV_VAR).is_ok() {
            return;
        }
        let path = resolve_db_path(None);
        assert!(path.to_string_lossy().ends_with("jobmaster.db"));
    }
}
