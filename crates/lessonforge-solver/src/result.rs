//! Outcome of a timetable solve.

use std::fmt;

use lessonforge_core::{ClassId, LessonKey, TeacherId};
use lessonforge_scoring::AuditEntry;
use serde::{Deserialize, Serialize};

/// Caller-facing verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    /// A timetable was found, optimal or the best within the time limit.
    Ok,
    /// The hard rules cannot all hold.
    Infeasible,
    /// The backend gave up without a timetable, usually on the time limit.
    Error,
}

impl SolveStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SolveStatus::Ok => "OK",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Size and timing of one solve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveStats {
    pub backend: String,
    pub variables: usize,
    pub constraints: usize,
    pub penalty_terms: usize,
    pub elapsed_ms: u64,
    /// True only when the backend proved no better timetable exists.
    pub proven_optimal: bool,
}

/// Timetable, objective and audit of one solve.
///
/// `assignment`, `objective_value` and `audit` are empty unless the status
/// is [`SolveStatus::Ok`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    pub status: SolveStatus,
    /// Placed lessons in class, day, period order.
    pub assignment: Vec<LessonKey>,
    pub objective_value: Option<i64>,
    /// Non-zero penalty and reward terms, most expensive first.
    pub audit: Vec<AuditEntry>,
    pub stats: SolveStats,
}

impl SolveResult {
    pub(crate) fn without_timetable(status: SolveStatus, stats: SolveStats) -> Self {
        Self {
            status,
            assignment: Vec::new(),
            objective_value: None,
            audit: Vec::new(),
            stats,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == SolveStatus::Ok
    }

    /// Lessons of one class.
    pub fn class_lessons<'a>(&'a self, class: &'a ClassId) -> impl Iterator<Item = &'a LessonKey> {
        self.assignment.iter().filter(move |l| &l.class == class)
    }

    /// Lessons of one teacher.
    pub fn teacher_lessons<'a>(
        &'a self,
        teacher: &'a TeacherId,
    ) -> impl Iterator<Item = &'a LessonKey> {
        self.assignment.iter().filter(move |l| &l.teacher == teacher)
    }

    /// Sum of the audit costs; equals `objective_value` for an OK result.
    pub fn audit_total(&self) -> i64 {
        self.audit.iter().map(|e| e.cost).sum()
    }
}
