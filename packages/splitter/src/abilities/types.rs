//! Types for the abilities chapter.

use crate::classify::is_blank;

/// One of the three fixed tiers of an ability group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Low,
    Mid,
    High,
}

impl Tier {
    /// All tiers in the order they appear in a group.
    pub const ALL: [Tier; 3] = [Tier::Low, Tier::Mid, Tier::High];

    /// Lower-case marker text expected after `#### `.
    #[must_use]
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Low => "low tier",
            Self::Mid => "mid tier",
            Self::High => "high tier",
        }
    }

    /// Heading text used in generated group files.
    #[must_use]
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Low => "Low Tier",
            Self::Mid => "Mid Tier",
            Self::High => "High Tier",
        }
    }
}

/// An ability group with its three tiers of ability names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbilityGroup {
    pub title: String,

    /// Description lines, trimmed and joined with single spaces.
    pub description: String,

    pub low_tier: Vec<String>,
    pub mid_tier: Vec<String>,
    pub high_tier: Vec<String>,
}

impl AbilityGroup {
    /// Ability names listed for `tier`.
    #[must_use]
    pub fn tier(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::Low => &self.low_tier,
            Tier::Mid => &self.mid_tier,
            Tier::High => &self.high_tier,
        }
    }
}

/// A single ability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ability {
    /// Name plus optional parenthetical, e.g. `"Fly (Air)"`.
    pub title: String,

    /// Description lines; never ends with a blank line.
    pub description: Vec<String>,
}

impl Ability {
    /// Create an ability, dropping trailing blank description lines.
    #[must_use]
    pub fn new(title: impl Into<String>, mut description: Vec<String>) -> Self {
        while description.last().is_some_and(|line| is_blank(line)) {
            description.pop();
        }
        Self {
            title: title.into(),
            description,
        }
    }
}
