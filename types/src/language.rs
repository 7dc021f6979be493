//! Language configuration and difficulty tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Vocabulary sophistication band for one language.
///
/// The bands are fixed semantics, restated verbatim in every prompt
/// because the provider is stateless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Fluent,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Fluent => "Fluent",
        }
    }

    /// The semantic band sent to the provider for this tier.
    #[must_use]
    pub const fn band(self) -> &'static str {
        match self {
            Difficulty::Beginner => "common, everyday vocabulary",
            Difficulty::Intermediate => "less common vocabulary of moderate difficulty",
            Difficulty::Advanced => "sophisticated, nuanced vocabulary",
            Difficulty::Fluent => "rare, literary, or specialized vocabulary",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Difficulty] {
        &[
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Advanced,
            Difficulty::Fluent,
        ]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user-configured language.
///
/// Names are unique case-insensitively within a settings document;
/// uniqueness is enforced at the [`crate::Settings`] mutation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub name: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl LanguageConfig {
    #[must_use]
    pub fn new(name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            difficulty,
            enabled: true,
        }
    }
}
