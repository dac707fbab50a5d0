//! LessonForge Core - Domain types for school timetabling
//!
//! This crate provides the fundamental abstractions shared by every
//! LessonForge crate:
//! - Typed identifiers for classes, teachers and subjects
//! - The weekly day/period calendar
//! - The timetabling problem (classes, curriculum, teacher blocks, groups)
//! - Composite decision keys and penalty categories

pub mod calendar;
pub mod error;
pub mod ids;
pub mod lesson;
pub mod penalty;
pub mod problem;

#[cfg(test)]
mod problem_tests;

pub use calendar::{
    periods_per_day, Day, Period, Slot, DAYS_PER_WEEK, MAX_PERIODS_PER_DAY, MIN_PERIODS_PER_DAY,
};
pub use error::{CapacityShortfall, Result, TimetableError};
pub use ids::{ClassId, SubjectId, TeacherId};
pub use lesson::LessonKey;
pub use penalty::PenaltyCategory;
pub use problem::{
    ClassGroup, CurriculumItem, FixedSlotGroup, SyncGroup, Teacher, TimetableProblem,
    DEFAULT_FREE_QUOTA,
};
