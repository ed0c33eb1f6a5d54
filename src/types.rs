use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal maturity level, 1 (lowest) through 4 (highest).
///
/// The fixed-form questionnaire calls these "paliers", the adaptive one
/// "tiers"; both vocabularies share this type and its ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Initiation,
    Experimentation,
    Structuring,
    Steering,
}

impl Tier {
    /// Ordinal level, 1-4
    pub fn level(self) -> u8 {
        match self {
            Tier::Initiation => 1,
            Tier::Experimentation => 2,
            Tier::Structuring => 3,
            Tier::Steering => 4,
        }
    }

    /// Tier for an ordinal level; out-of-range levels clamp to the nearest end
    pub fn from_level(level: u8) -> Tier {
        match level {
            0 | 1 => Tier::Initiation,
            2 => Tier::Experimentation,
            3 => Tier::Structuring,
            _ => Tier::Steering,
        }
    }

    /// Report label for this level
    pub fn label(self) -> &'static str {
        match self {
            Tier::Initiation => "Initiation",
            Tier::Experimentation => "Experimentation",
            Tier::Structuring => "Structuring",
            Tier::Steering => "Steering & Innovation",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Organization-wide maturity label derived from the global percentage.
///
/// Two naming sets exist: the adaptive reports use the English names, the
/// fixed-form reports the localized ones. Ordinal semantics are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Beginner,
    Emerging,
    Challenger,
    Leader,
}

impl Profile {
    /// Ordinal level, 1-4, always aligned with the tier of the same rank
    pub fn level(self) -> u8 {
        match self {
            Profile::Beginner => 1,
            Profile::Emerging => 2,
            Profile::Challenger => 3,
            Profile::Leader => 4,
        }
    }

    /// Profile for an ordinal level; out-of-range levels clamp to the nearest end
    pub fn from_level(level: u8) -> Profile {
        match level {
            0 | 1 => Profile::Beginner,
            2 => Profile::Emerging,
            3 => Profile::Challenger,
            _ => Profile::Leader,
        }
    }

    /// English label (adaptive reports)
    pub fn name(self) -> &'static str {
        match self {
            Profile::Beginner => "Beginner",
            Profile::Emerging => "Emerging",
            Profile::Challenger => "Challenger",
            Profile::Leader => "Leader",
        }
    }

    /// Localized label (fixed-form reports)
    pub fn localized_name(self) -> &'static str {
        match self {
            Profile::Beginner => "Débutant",
            Profile::Emerging => "Émergent",
            Profile::Challenger => "Challenger",
            Profile::Leader => "Leader",
        }
    }

    /// Tier an organization at this profile measures itself against
    pub fn target_tier(self) -> Tier {
        Tier::from_level(self.level())
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Remediation priority derived from a tier gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

/// Position of an achieved tier relative to the target tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierStatus {
    Below,
    On,
    Above,
}

impl TierStatus {
    pub fn label(self) -> &'static str {
        match self {
            TierStatus::Below => "Below target",
            TierStatus::On => "On target",
            TierStatus::Above => "Above target",
        }
    }
}

impl fmt::Display for TierStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How the target tier for gap analysis is chosen.
///
/// The fixed-form path measures every dimension against the maximum tier;
/// the adaptive path measures against the tier implied by the global
/// profile. Both policies stay selectable on either path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetPolicy {
    /// Every dimension is measured against tier 4
    FixedMax,
    /// Every dimension is measured against the global profile's own tier
    ProfileDerived,
}

impl TargetPolicy {
    pub fn target_tier(self, profile: Profile) -> Tier {
        match self {
            TargetPolicy::FixedMax => Tier::Steering,
            TargetPolicy::ProfileDerived => profile.target_tier(),
        }
    }
}

// ── Answer types ──

/// Recorded score for one adaptive answer: a scalar, or one sub-score per
/// selected option for multiselect questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Scalar(f64),
    MultiSelect(Vec<f64>),
}

impl AnswerValue {
    /// Sum of all sub-scores (the scalar itself for scalar answers)
    pub fn total(&self) -> f64 {
        match self {
            AnswerValue::Scalar(v) => *v,
            AnswerValue::MultiSelect(vs) => vs.iter().sum(),
        }
    }
}

/// Raw reply from the person taking the adaptive questionnaire, before it
/// is converted to an [`AnswerValue`] via the question's scoring data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAnswer {
    /// Yes/no reply to a binary question
    Binary(bool),
    /// Selected option value of a choice question
    Choice(String),
    /// Selected option values of a multiselect question
    Selections(Vec<String>),
}

// ── Computed score types ──

/// Per-palier criterion sums for one dimension (nominal range 0-9 each;
/// malformed upstream data may exceed it, sums are not clamped)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PalierScores {
    pub p1: f64,
    pub p2: f64,
    pub p3: f64,
    pub p4: f64,
}

impl PalierScores {
    pub fn total(&self) -> f64 {
        self.p1 + self.p2 + self.p3 + self.p4
    }
}

/// Computed score for one dimension in the fixed-form mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub id: String,
    pub name: String,
    pub palier_scores: PalierScores,
    /// Sum of all palier scores, 0-36 for well-formed answers
    pub raw_score: f64,
    /// raw_score/36 rounded to whole percent
    pub percentage: i32,
    pub achieved_tier: Tier,
}

/// Percentage score for one dimension in the adaptive mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionPercentage {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub percentage: i32,
}

/// Gap between achieved and target tier for one dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapInfo {
    pub id: String,
    pub name: String,
    pub achieved_tier: Tier,
    pub target_tier: Tier,
    pub gap: u8,
    pub priority: Priority,
}
