//! Path management for finboard
//!
//! ## Path Resolution Order
//!
//! 1. `FINBOARD_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories` (e.g. `~/.config/finboard`)
//! 3. `$XDG_CONFIG_HOME/finboard` or `$HOME/.config/finboard`
//!
//! Records are scoped per profile: each profile gets its own directory under
//! `data/`, so two people sharing a machine never see each other's records.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::FinboardError;

/// Profile used when none is given
pub const DEFAULT_PROFILE: &str = "default";

/// Manages all paths used by finboard
#[derive(Debug, Clone)]
pub struct FinboardPaths {
    /// Base directory for all finboard data
    base_dir: PathBuf,
    /// Name of the active profile
    profile: String,
}

impl FinboardPaths {
    /// Resolve the base directory and use the default profile
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> Result<Self, FinboardError> {
        let base_dir = if let Ok(custom) = std::env::var("FINBOARD_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self {
            base_dir,
            profile: DEFAULT_PROFILE.to_string(),
        })
    }

    /// Create paths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            profile: DEFAULT_PROFILE.to_string(),
        }
    }

    /// Switch to another profile
    ///
    /// Profile names become directory names, so only ASCII letters, digits,
    /// `-` and `_` are accepted.
    pub fn with_profile(mut self, profile: &str) -> Result<Self, FinboardError> {
        let profile = profile.trim();
        let valid = !profile.is_empty()
            && profile
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(FinboardError::Config(format!(
                "Invalid profile name '{}': use letters, digits, '-' or '_'",
                profile
            )));
        }
        self.profile = profile.to_string();
        Ok(self)
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Directory holding the active profile's records
    pub fn profile_dir(&self) -> PathBuf {
        self.data_dir().join(&self.profile)
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the active profile's audit log
    pub fn audit_log(&self) -> PathBuf {
        self.profile_dir().join("audit.log")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.profile_dir().join("transactions.json")
    }

    pub fn payables_file(&self) -> PathBuf {
        self.profile_dir().join("to_be_paid.json")
    }

    pub fn credit_cards_file(&self) -> PathBuf {
        self.profile_dir().join("credit_cards.json")
    }

    /// Ensure the base, data and profile directories exist
    pub fn ensure_directories(&self) -> Result<(), FinboardError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FinboardError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.profile_dir())
            .map_err(|e| FinboardError::Io(format!("Failed to create profile directory: {}", e)))?;

        Ok(())
    }

    /// Check if finboard has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default base directory based on platform
fn resolve_default_path() -> Result<PathBuf, FinboardError> {
    if let Some(dirs) = ProjectDirs::from("", "", "finboard") {
        return Ok(dirs.config_dir().to_path_buf());
    }

    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                FinboardError::Config("Could not determine a home directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("finboard"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinboardPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.profile(), DEFAULT_PROFILE);
        assert_eq!(
            paths.transactions_file(),
            temp_dir.path().join("data").join("default").join("transactions.json")
        );
    }

    #[test]
    fn test_profiles_are_separate() {
        let temp_dir = TempDir::new().unwrap();
        let alice = FinboardPaths::with_base_dir(temp_dir.path().to_path_buf())
            .with_profile("alice")
            .unwrap();
        let bob = FinboardPaths::with_base_dir(temp_dir.path().to_path_buf())
            .with_profile("bob")
            .unwrap();

        assert_ne!(alice.payables_file(), bob.payables_file());
        assert_eq!(alice.settings_file(), bob.settings_file());
    }

    #[test]
    fn test_invalid_profile_names() {
        let paths = FinboardPaths::with_base_dir(PathBuf::from("/tmp/unused"));
        assert!(paths.clone().with_profile("").is_err());
        assert!(paths.clone().with_profile("../etc").is_err());
        assert!(paths.with_profile("work_2025").is_ok());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinboardPaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.profile_dir().exists());
        assert!(!paths.is_initialized());
    }
}
