//! Bounded grade and difficulty values

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// School grade a session targets (5 through 11).
///
/// Deserialization clamps out-of-range values instead of failing, so a
/// slightly malformed stored aggregate still loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Grade(u8);

impl Grade {
    pub const MIN: u8 = 5;
    pub const MAX: u8 = 11;

    /// Create a grade, rejecting values outside 5-11.
    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(EngineError::InvalidGrade(value))
        }
    }

    /// Create a grade, clamping into 5-11.
    pub fn clamped(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Grade {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl From<u8> for Grade {
    fn from(value: u8) -> Self {
        Self::clamped(value)
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> Self {
        grade.0
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Selected difficulty level (1 through 5).
///
/// This is the single piece of cross-session state the adapter reads and
/// writes. Raising or lowering saturates at the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct DifficultyLevel(u8);

impl DifficultyLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Create a level, rejecting values outside 1-5.
    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(EngineError::InvalidDifficulty(value))
        }
    }

    /// Create a level, clamping into 1-5.
    pub fn clamped(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// One level harder, capped at 5.
    #[must_use]
    pub fn raised(self) -> Self {
        Self((self.0 + 1).min(Self::MAX))
    }

    /// One level easier, floored at 1.
    #[must_use]
    pub fn lowered(self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::MIN))
    }

    /// Every level, easiest first.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        Self(3)
    }
}

impl From<u8> for DifficultyLevel {
    fn from(value: u8) -> Self {
        Self::clamped(value)
    }
}

impl From<DifficultyLevel> for u8 {
    fn from(level: DifficultyLevel) -> Self {
        level.0
    }
}

impl std::fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_bounds() {
        assert!(Grade::new(4).is_err());
        assert!(Grade::new(12).is_err());
        assert_eq!(Grade::new(9).unwrap().get(), 9);
        assert_eq!(Grade::clamped(2).get(), 5);
        assert_eq!(Grade::clamped(40).get(), 11);
    }

    #[test]
    fn test_difficulty_saturates() {
        let easiest = DifficultyLevel::new(1).unwrap();
        assert_eq!(easiest.lowered(), easiest);
        let hardest = DifficultyLevel::new(5).unwrap();
        assert_eq!(hardest.raised(), hardest);
        assert_eq!(DifficultyLevel::new(3).unwrap().raised().get(), 4);
        assert_eq!(DifficultyLevel::new(3).unwrap().lowered().get(), 2);
    }

    #[test]
    fn test_difficulty_default_is_three() {
        assert_eq!(DifficultyLevel::default().get(), 3);
    }

    #[test]
    fn test_deserialize_clamps() {
        let level: DifficultyLevel = serde_json::from_str("9").unwrap();
        assert_eq!(level.get(), 5);
        let grade: Grade = serde_json::from_str("1").unwrap();
        assert_eq!(grade.get(), 5);
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&DifficultyLevel::new(4).unwrap()).unwrap();
        assert_eq!(json, "4");
    }
}
