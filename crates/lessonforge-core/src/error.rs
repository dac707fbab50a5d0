//! Error types for LessonForge

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::TeacherId;

/// A teacher whose weekly load cannot fit into the free slots of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityShortfall {
    pub teacher: TeacherId,
    /// Lessons the curriculum asks of the teacher.
    pub required: u32,
    /// Unblocked slots in the week.
    pub available: u32,
}

impl CapacityShortfall {
    /// Number of lessons that do not fit.
    pub fn deficit(&self) -> u32 {
        self.required.saturating_sub(self.available)
    }
}

impl fmt::Display for CapacityShortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} needs {} lessons but has {} free slots ({} short)",
            self.teacher,
            self.required,
            self.available,
            self.deficit()
        )
    }
}

/// Main error type for LessonForge operations
#[derive(Debug, Error)]
pub enum TimetableError {
    /// Caller supplied data that cannot be turned into a model
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// At least one teacher is overbooked; the solver was not invoked
    #[error("Capacity check failed: {}", format_shortfalls(.0))]
    CapacityExceeded(Vec<CapacityShortfall>),

    /// Error while assembling the constraint model
    #[error("Model error: {0}")]
    Model(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

fn format_shortfalls(shortfalls: &[CapacityShortfall]) -> String {
    shortfalls
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for LessonForge operations
pub type Result<T> = std::result::Result<T, TimetableError>;
