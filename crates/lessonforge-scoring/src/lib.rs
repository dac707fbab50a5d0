//! LessonForge Scoring - From a timetabling problem to a weighted model
//!
//! This crate turns a [`TimetableProblem`](lessonforge_core::TimetableProblem)
//! into a [`Model`](lessonforge_model::Model):
//! - [`capacity`] - Per-teacher load check run before any model is built
//! - [`grid`] - Decision variables and their lookup indices
//! - [`hard`] - Exclusivity, exact load, blocks, fixed slots, double period rules
//! - [`soft`] - Overload, single lesson days, idle gaps, doubles, synchronization
//! - [`analysis`] - Penalty ledger and the cost audit
//!
//! # Example
//!
//! ```
//! use lessonforge_config::TimetableConfig;
//! use lessonforge_core::{CurriculumItem, TimetableProblem};
//! use lessonforge_scoring::TimetableModel;
//!
//! let problem = TimetableProblem::new()
//!     .with_class("6A", 25)
//!     .with_item(CurriculumItem::new("Ana", "Math", "6A", 4));
//!
//! let built = TimetableModel::build(&problem, &TimetableConfig::default());
//! assert_eq!(built.grid.lessons().len(), 25);
//! assert!(!built.ledger.is_empty());
//! ```

pub mod analysis;
pub mod builder;
pub mod capacity;
pub mod grid;
pub mod hard;
pub mod soft;

#[cfg(test)]
mod grid_tests;

pub use analysis::{summarize, AuditEntry, CategorySummary, PenaltyLedger, PenaltyTerm};
pub use builder::TimetableModel;
pub use capacity::{check_capacity, CapacityReport, CapacityStatus, TeacherCapacity};
pub use grid::{Lesson, LessonGrid};
pub use hard::{post_hard_constraints, HardConstraintCounts};
pub use soft::post_soft_constraints;
