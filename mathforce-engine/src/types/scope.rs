//! Role scope for persisted records

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Who is using the app; every persisted record is scoped by role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Teacher,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            other => Err(EngineError::InvalidRole(other.to_string())),
        }
    }
}

/// Build the storage key for `base` under an optional role (`<base>_<role>`).
///
/// Without a role the base key is used unscoped.
pub fn scoped_key(base: &str, role: Option<Role>) -> String {
    match role {
        Some(role) => format!("{base}_{role}"),
        None => base.to_string(),
    }
}
