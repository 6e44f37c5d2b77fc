//! Engine configuration.
//!
//! Every section defaults, so a partial TOML file only overrides what it
//! names:
//!
//! ```toml
//! role = "teacher"
//!
//! [session]
//! grade = 7
//! question_count = 15
//!
//! [storage]
//! data_dir = "/var/lib/mathforce"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::adapt::SessionSettings;
use crate::analysis::Locale;
use crate::session::COUNTDOWN_SECONDS;
use crate::store::JsonFileStore;
use crate::types::Role;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Role every persisted record is scoped to
    pub role: Role,
    /// Language for ERA and recommendation text
    pub locale: Locale,
    pub session: SessionDefaults,
    pub storage: StorageConfig,
}

/// Defaults for a new session when the caller does not specify them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionDefaults {
    pub grade: u8,
    pub difficulty: u8,
    pub question_count: usize,
    /// Length of the session countdown in seconds
    pub countdown_seconds: u32,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            grade: 5,
            difficulty: 3,
            question_count: 10,
            countdown_seconds: COUNTDOWN_SECONDS,
        }
    }
}

impl SessionDefaults {
    /// Normalize explicit overrides, falling back to these defaults.
    pub fn settings(
        &self,
        grade: Option<u8>,
        difficulty: Option<u8>,
        count: Option<usize>,
    ) -> SessionSettings {
        SessionSettings::normalized(
            grade.or(Some(self.grade)),
            difficulty.or(Some(self.difficulty)),
            count.or(Some(self.question_count)),
        )
    }
}

/// Where persisted records live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: mathforce_paths::store_dir(),
        }
    }
}

impl StorageConfig {
    pub fn open(&self) -> JsonFileStore {
        JsonFileStore::new(&self.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.role, Role::Student);
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.session.grade, 5);
        assert_eq!(config.session.difficulty, 3);
        assert_eq!(config.session.question_count, 10);
        assert_eq!(config.session.countdown_seconds, 180);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            role = "teacher"

            [session]
            grade = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.role, Role::Teacher);
        assert_eq!(config.session.grade, 8);
        assert_eq!(config.session.difficulty, 3);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_storage_dir_from_toml() {
        let config: EngineConfig = toml::from_str(
            r#"
            [storage]
            data_dir = "/tmp/mf"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.open().dir(), std::path::Path::new("/tmp/mf"));
    }

    #[test]
    fn test_settings_prefer_overrides() {
        let defaults = SessionDefaults {
            grade: 9,
            ..Default::default()
        };
        let s = defaults.settings(None, Some(5), None);
        assert_eq!(s.grade.get(), 9);
        assert_eq!(s.difficulty.get(), 5);
        assert_eq!(s.count, 10);

        let s = defaults.settings(Some(20), None, Some(50));
        assert_eq!(s.grade.get(), 11);
        assert_eq!(s.count, 30);
    }
}
