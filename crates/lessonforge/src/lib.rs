//! LessonForge - School timetabling on a constraint solver
//!
//! Describe classes, a curriculum and teacher unavailability, then solve:
//!
//! ```no_run
//! use lessonforge::prelude::*;
//!
//! let problem = TimetableProblem::new()
//!     .with_class("6A", 25)
//!     .with_item(CurriculumItem::new("Ana", "Math", "6A", 5));
//!
//! let solver = TimetableSolver::new(TimetableConfig::default());
//! let result = solver.solve(&problem).unwrap();
//! assert_eq!(result.status, SolveStatus::Ok);
//! println!("{}", lessonforge::render::class_grids(&problem, &result));
//! ```
//!
//! Spreadsheet-style rows go through [`curriculum::normalize`] first.

pub mod console;
pub mod curriculum;
pub mod render;

#[cfg(test)]
mod render_tests;

// Domain types
pub use lessonforge_core::{
    ClassId, CurriculumItem, Day, FixedSlotGroup, LessonKey, PenaltyCategory, Period, Slot,
    SubjectId, SyncGroup, TeacherId, TimetableError, TimetableProblem,
};

// Configuration
pub use lessonforge_config::{ConfigError, PenaltyWeights, SyncScope, TimetableConfig};

// Capacity report and audit
pub use lessonforge_scoring::{AuditEntry, CapacityReport, CapacityStatus, TeacherCapacity};

// Solving
pub use lessonforge_model::{PumpkinBackend, SolverBackend, SolverStatus};
pub use lessonforge_solver::{SolveResult, SolveStats, SolveStatus, SolverSession, TimetableSolver};

pub use curriculum::{normalize, CurriculumError, RawCurriculum, RawRow};

pub mod prelude {
    pub use super::{
        CurriculumItem, FixedSlotGroup, PenaltyCategory, Slot, SyncGroup, TimetableProblem,
    };
    pub use super::{SolveResult, SolveStatus, SolverSession, TimetableSolver};
    pub use super::{SyncScope, TimetableConfig};
}
