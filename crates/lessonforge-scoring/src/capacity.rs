//! Teacher capacity pre-check.
//!
//! Compares each teacher's weekly load with the slots left after their
//! blocks, before any model is built. A teacher who needs more lessons than
//! they have free slots makes the whole problem infeasible; the report names
//! them.

use std::collections::BTreeMap;
use std::fmt;

use lessonforge_core::{
    CapacityShortfall, Result, TeacherId, TimetableError, TimetableProblem, DAYS_PER_WEEK,
};
use serde::Serialize;

/// Minimum spare slots for a teacher to count as comfortably scheduled.
pub const TIGHT_MARGIN: i64 = 2;

/// Verdict for one teacher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CapacityStatus {
    Ok,
    /// Fits, with fewer than [`TIGHT_MARGIN`] slots to spare.
    Tight,
    /// Cannot fit.
    Critical,
}

impl CapacityStatus {
    fn from_balance(balance: i64) -> Self {
        if balance >= TIGHT_MARGIN {
            CapacityStatus::Ok
        } else if balance >= 0 {
            CapacityStatus::Tight
        } else {
            CapacityStatus::Critical
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CapacityStatus::Ok => "OK",
            CapacityStatus::Tight => "TIGHT",
            CapacityStatus::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for CapacityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Load and free slots of one teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeacherCapacity {
    pub teacher: TeacherId,
    pub required: u32,
    /// Distinct blocked slots inside the school week.
    pub blocked: u32,
    pub available: u32,
    pub balance: i64,
    pub status: CapacityStatus,
}

/// Outcome of [`check_capacity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityReport {
    pub school_max_periods: usize,
    /// One row per teacher named by the curriculum, in identifier order.
    pub teachers: Vec<TeacherCapacity>,
}

impl CapacityReport {
    /// True when no teacher is critical.
    pub fn passed(&self) -> bool {
        self.critical().next().is_none()
    }

    pub fn critical(&self) -> impl Iterator<Item = &TeacherCapacity> {
        self.teachers
            .iter()
            .filter(|t| t.status == CapacityStatus::Critical)
    }

    pub fn shortfalls(&self) -> Vec<CapacityShortfall> {
        self.critical()
            .map(|t| CapacityShortfall {
                teacher: t.teacher.clone(),
                required: t.required,
                available: t.available,
            })
            .collect()
    }

    /// Turns a failing report into [`TimetableError::CapacityExceeded`].
    pub fn into_result(self) -> Result<CapacityReport> {
        if self.passed() {
            Ok(self)
        } else {
            Err(TimetableError::CapacityExceeded(self.shortfalls()))
        }
    }
}

/// Computes every teacher's capacity balance.
///
/// Pure: the same problem always yields the same report.
///
/// # Example
///
/// ```
/// use lessonforge_core::{CurriculumItem, TimetableProblem};
/// use lessonforge_scoring::capacity::{check_capacity, CapacityStatus};
///
/// let problem = TimetableProblem::new()
///     .with_class("6A", 25)
///     .with_item(CurriculumItem::new("Ana", "Math", "6A", 24));
///
/// let report = check_capacity(&problem);
/// assert!(report.passed());
/// assert_eq!(report.teachers[0].status, CapacityStatus::Tight);
/// ```
pub fn check_capacity(problem: &TimetableProblem) -> CapacityReport {
    let school_max = problem.school_max_periods_per_day();
    let week = (DAYS_PER_WEEK * school_max) as u32;

    let mut required: BTreeMap<&TeacherId, u32> = BTreeMap::new();
    for item in &problem.curriculum {
        *required.entry(&item.teacher).or_default() += item.quantity;
    }

    let teachers = required
        .into_iter()
        .map(|(teacher, required)| {
            // BTreeSet keeps blocks distinct already
            let blocked = problem
                .teacher_blocks
                .get(teacher)
                .map(|blocks| {
                    blocks
                        .iter()
                        .filter(|slot| slot.period.index() < school_max)
                        .count() as u32
                })
                .unwrap_or(0);
            let available = week.saturating_sub(blocked);
            let balance = available as i64 - required as i64;
            TeacherCapacity {
                teacher: teacher.clone(),
                required,
                blocked,
                available,
                balance,
                status: CapacityStatus::from_balance(balance),
            }
        })
        .collect();

    CapacityReport {
        school_max_periods: school_max,
        teachers,
    }
}
