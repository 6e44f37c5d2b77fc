use std::path::PathBuf;

use mathforce_engine::{EngineConfig, Locale, Role, SessionDefaults, StorageConfig};
use serde::Deserialize;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct RawConfig {
    pub role: Option<Role>,

    pub locale: Option<Locale>,

    #[serde(default)]
    pub session: RawSessionConfig,

    #[serde(default)]
    pub storage: RawStorageConfig,
}

/// Session defaults as stored in TOML
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct RawSessionConfig {
    pub grade: Option<u8>,
    pub difficulty: Option<u8>,
    pub question_count: Option<usize>,
    pub countdown_seconds: Option<u32>,
}

/// Storage settings as stored in TOML
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct RawStorageConfig {
    /// Directory holding history, weak-topic and last-session records
    pub data_dir: Option<PathBuf>,
}

impl RawConfig {
    /// Overlay values override self only where explicitly set
    pub fn merge(self, overlay: RawConfig) -> RawConfig {
        RawConfig {
            role: overlay.role.or(self.role),
            locale: overlay.locale.or(self.locale),
            session: RawSessionConfig {
                grade: overlay.session.grade.or(self.session.grade),
                difficulty: overlay.session.difficulty.or(self.session.difficulty),
                question_count: overlay.session.question_count.or(self.session.question_count),
                countdown_seconds: overlay
                    .session
                    .countdown_seconds
                    .or(self.session.countdown_seconds),
            },
            storage: RawStorageConfig {
                data_dir: overlay.storage.data_dir.or(self.storage.data_dir),
            },
        }
    }

    /// Apply defaults for everything left unset
    pub fn finalize(self) -> EngineConfig {
        let session = SessionDefaults::default();
        let storage = StorageConfig::default();
        EngineConfig {
            role: self.role.unwrap_or_default(),
            locale: self.locale.unwrap_or_default(),
            session: SessionDefaults {
                grade: self.session.grade.unwrap_or(session.grade),
                difficulty: self.session.difficulty.unwrap_or(session.difficulty),
                question_count: self.session.question_count.unwrap_or(session.question_count),
                countdown_seconds: self
                    .session
                    .countdown_seconds
                    .unwrap_or(session.countdown_seconds),
            },
            storage: StorageConfig {
                data_dir: self.storage.data_dir.unwrap_or(storage.data_dir),
            },
        }
    }
}
