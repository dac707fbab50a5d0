//! Composite key of a lesson placement.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calendar::{Day, Period, Slot};
use crate::ids::{ClassId, SubjectId, TeacherId};

/// Identifies one decision: `teacher` teaches `subject` to `class` at
/// `(day, period)`.
///
/// Ordering is class, day, period, teacher, subject, which is the order a
/// printed timetable reads in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LessonKey {
    pub class: ClassId,
    pub day: Day,
    pub period: Period,
    pub teacher: TeacherId,
    pub subject: SubjectId,
}

impl LessonKey {
    pub fn new(
        class: ClassId,
        day: Day,
        period: Period,
        teacher: TeacherId,
        subject: SubjectId,
    ) -> Self {
        Self {
            class,
            day,
            period,
            teacher,
            subject,
        }
    }

    pub fn slot(&self) -> Slot {
        Slot::new(self.day, self.period)
    }
}

impl fmt::Display for LessonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}: {} ({})",
            self.class, self.day, self.period, self.subject, self.teacher
        )
    }
}
