//! Skill level label shared by the quiz, the ranker and the learning backend.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Derived skill level of the current user.
///
/// `NotAssessed` is the "Take Quiz" sentinel shown until the first quiz
/// completes (or the backend reports a level).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkillLevel {
    #[default]
    NotAssessed,
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::NotAssessed => "Take Quiz",
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
        }
    }

    /// Parse a label from the learning backend's vocabulary.
    ///
    /// Case-insensitive; "Expert" is a synonym of `Advanced`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "take quiz" => Some(SkillLevel::NotAssessed),
            "beginner" => Some(SkillLevel::Beginner),
            "intermediate" => Some(SkillLevel::Intermediate),
            "advanced" | "expert" => Some(SkillLevel::Advanced),
            _ => None,
        }
    }

    /// Content tag that earns the skill-alignment bonus for this level.
    pub fn bonus_tag(&self) -> Option<&'static str> {
        match self {
            SkillLevel::NotAssessed => None,
            SkillLevel::Beginner => Some("beginner"),
            SkillLevel::Intermediate => Some("intermediate"),
            SkillLevel::Advanced => Some("advanced"),
        }
    }

    pub fn is_assessed(&self) -> bool {
        !matches!(self, SkillLevel::NotAssessed)
    }
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SkillLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SkillLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        SkillLevel::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown skill level '{}'", raw)))
    }
}
