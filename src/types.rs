//! Common Types and Constants
//!
//! Shared data structures used by the mastery calculator and the review
//! scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Minimum review interval in days
pub const MIN_INTERVAL_DAYS: f64 = 1.0;

/// Maximum review interval in days
pub const MAX_INTERVAL_DAYS: f64 = 180.0;

/// Lower bound for the SRS ease factor
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Upper bound for the SRS ease factor
pub const MAX_EASE_FACTOR: f64 = 2.8;

/// Default ease factor for a skill never practiced
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Mastery level bounds
pub const MIN_MASTERY_LEVEL: i32 = 0;
pub const MAX_MASTERY_LEVEL: i32 = 100;

// ==================== Skill progress ====================

/// Per-skill spaced-repetition scheduling state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SrsState {
    /// Interval growth factor, clamped to [1.3, 2.8]
    pub ease_factor: f64,
    /// Last scheduled interval in days (0 before the first practice)
    pub interval_days: f64,
    /// Total recorded attempts
    pub reps: i32,
    /// Incorrect attempts
    pub lapses: i32,
}

impl Default for SrsState {
    fn default() -> Self {
        Self {
            ease_factor: DEFAULT_EASE_FACTOR,
            interval_days: 0.0,
            reps: 0,
            lapses: 0,
        }
    }
}

impl SrsState {
    pub fn is_new(&self) -> bool {
        self.reps == 0
    }
}

/// A learner's progress record for one skill. Mutated only through
/// [`compute_mastery_update`](crate::mastery::compute_mastery_update);
/// persisted by an external collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillProgress {
    pub skill_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competency_area_id: Option<String>,
    /// Mastery level in [0, 100]; out-of-range values are clamped on read
    pub mastery_level: i32,
    #[serde(default)]
    pub srs: SrsState,
    pub next_review_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_practiced_at: Option<DateTime<Utc>>,
}

/// One practice attempt outcome, as reported by the exercise pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptOutcome {
    pub correct: bool,
    pub response_time_ms: i64,
    pub hints_used: i32,
}

/// Result of a mastery update: the new level, scheduling state, and due
/// date to persist.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryUpdate {
    pub mastery_level: i32,
    pub srs: SrsState,
    pub next_review_at: DateTime<Utc>,
}

// ==================== Mastery bands ====================

/// Display classification of a mastery level. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MasteryBand {
    Introduced,
    Developing,
    Progressing,
    Proficient,
    Mastered,
}

impl MasteryBand {
    /// Classify a level. Input is clamped to [0, 100] first, so the
    /// partition has no gaps or overlaps.
    pub fn from_level(level: i32) -> Self {
        match level.clamp(MIN_MASTERY_LEVEL, MAX_MASTERY_LEVEL) {
            0..=19 => Self::Introduced,
            20..=39 => Self::Developing,
            40..=59 => Self::Progressing,
            60..=79 => Self::Proficient,
            _ => Self::Mastered,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Introduced => "introduced",
            Self::Developing => "developing",
            Self::Progressing => "progressing",
            Self::Proficient => "proficient",
            Self::Mastered => "mastered",
        }
    }

    /// Inclusive level range covered by this band.
    pub fn range(&self) -> (i32, i32) {
        match self {
            Self::Introduced => (0, 19),
            Self::Developing => (20, 39),
            Self::Progressing => (40, 59),
            Self::Proficient => (60, 79),
            Self::Mastered => (80, 100),
        }
    }
}

// ==================== Scheduled reviews ====================

/// How soon a scheduled review needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    Overdue,
    Today,
    ThisWeek,
    Upcoming,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::Today => "today",
            Self::ThisWeek => "this-week",
            Self::Upcoming => "upcoming",
        }
    }
}

/// Read-only projection of a progress record for display and selection.
///
/// `days_overdue` is present if and only if `urgency` is
/// [`Urgency::Overdue`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledReview {
    pub skill_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competency_area_id: Option<String>,
    pub mastery_level: i32,
    pub next_review_at: DateTime<Utc>,
    pub urgency: Urgency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_overdue: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_practiced: Option<DateTime<Utc>>,
}
