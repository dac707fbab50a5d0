//! Soft constraint categories.
//!
//! Every objective term belongs to exactly one category. The category names
//! the preference in the audit and selects the configured weight.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of scheduling preference a penalty (or reward) term expresses.
///
/// # Example
///
/// ```
/// use lessonforge_core::PenaltyCategory;
///
/// assert_eq!(PenaltyCategory::IdleGap.key(), "idle_gap");
/// assert_eq!(PenaltyCategory::IdleGap.to_string(), "Idle gaps");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyCategory {
    /// More periods than the daily threshold for one teacher.
    DailyOverload,
    /// A teacher comes in for a single lesson.
    SingleLessonDay,
    /// Idle periods between a teacher's first and last lesson.
    IdleGap,
    /// Same class, teacher and subject in two adjacent periods.
    DoublePeriod,
    /// Synchronized subjects landing on different days.
    SyncDisagreement,
}

impl PenaltyCategory {
    /// All categories in audit order.
    pub const ALL: [PenaltyCategory; 5] = [
        PenaltyCategory::DailyOverload,
        PenaltyCategory::SingleLessonDay,
        PenaltyCategory::IdleGap,
        PenaltyCategory::DoublePeriod,
        PenaltyCategory::SyncDisagreement,
    ];

    /// Stable machine-readable key.
    pub fn key(self) -> &'static str {
        match self {
            PenaltyCategory::DailyOverload => "daily_overload",
            PenaltyCategory::SingleLessonDay => "single_lesson_day",
            PenaltyCategory::IdleGap => "idle_gap",
            PenaltyCategory::DoublePeriod => "double_period",
            PenaltyCategory::SyncDisagreement => "sync_disagreement",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            PenaltyCategory::DailyOverload => "Daily overload",
            PenaltyCategory::SingleLessonDay => "Single lesson day",
            PenaltyCategory::IdleGap => "Idle gaps",
            PenaltyCategory::DoublePeriod => "Double period",
            PenaltyCategory::SyncDisagreement => "Out of sync",
        }
    }
}

impl fmt::Display for PenaltyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
