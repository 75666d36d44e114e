//! `.env` file loading.
//!
//! The file is loaded before command-line parsing so that its values feed the
//! `env` fallbacks of every flag. Variables already set in the process
//! environment win over the file.

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Name of the environment file looked up in the base directory.
pub const DOTENV_FILE: &str = ".env";

/// Loads `<base_dir>/.env` if it exists.
///
/// Returns the path that was loaded, or `None` when there is no file.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be parsed.
pub fn load_dotenv(base_dir: impl AsRef<Path>) -> Result<Option<PathBuf>> {
    let env_path = base_dir.as_ref().join(DOTENV_FILE);

    if !env_path.exists() {
        return Ok(None);
    }

    dotenvy::from_path(&env_path).map_err(|e| ConfigError::DotenvError {
        path: env_path.clone(),
        message: e.to_string(),
    })?;

    Ok(Some(env_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = TempDir::new().expect("Failed to create temp dir");

        let loaded = load_dotenv(dir.path()).expect("no file is fine");

        assert!(loaded.is_none());
    }

    #[test]
    fn test_loads_variables_from_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(
            dir.path().join(DOTENV_FILE),
            "IPLIST_SYNC_TEST_DOTENV_VALUE=from-file\n",
        )
        .expect("Failed to write .env");

        let loaded = load_dotenv(dir.path()).expect("valid file");

        assert_eq!(loaded, Some(dir.path().join(DOTENV_FILE)));
        assert_eq!(
            std::env::var("IPLIST_SYNC_TEST_DOTENV_VALUE").as_deref(),
            Ok("from-file")
        );
    }

    #[test]
    fn test_malformed_file_is_reported() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(dir.path().join(DOTENV_FILE), "NOT A VALID LINE 'unterminated\n")
            .expect("Failed to write .env");

        let err = load_dotenv(dir.path()).expect_err("malformed file");

        assert!(matches!(err, SyncError::Config(ConfigError::DotenvError { .. })));
    }
}
