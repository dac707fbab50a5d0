//! The weekly teaching calendar.
//!
//! A week has [`DAYS_PER_WEEK`] instructional days. The period axis of a
//! class is `periods_per_day(weekly_lessons)` long; the school-wide grid uses
//! the longest day of any class.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of instructional days in a week.
pub const DAYS_PER_WEEK: usize = 5;

/// No class has a shorter day than this.
pub const MIN_PERIODS_PER_DAY: usize = 5;

/// Longest day a [`Period`] can index.
pub const MAX_PERIODS_PER_DAY: usize = u8::MAX as usize + 1;

const DAY_NAMES: [&str; DAYS_PER_WEEK] = ["Mon", "Tue", "Wed", "Thu", "Fri"];

/// Periods per day for a class with the given weekly lesson count.
///
/// # Examples
///
/// ```
/// use lessonforge_core::periods_per_day;
///
/// assert_eq!(periods_per_day(25), 5);
/// assert_eq!(periods_per_day(26), 6);
/// assert_eq!(periods_per_day(12), 5);
/// ```
pub fn periods_per_day(weekly_lessons: u32) -> usize {
    let per_day = (weekly_lessons as usize).div_ceil(DAYS_PER_WEEK);
    per_day.max(MIN_PERIODS_PER_DAY)
}

/// An instructional day, `0` is Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(u8);

impl Day {
    /// Creates a day from its zero-based index, `None` past Friday.
    pub fn new(index: usize) -> Option<Self> {
        (index < DAYS_PER_WEEK).then_some(Self(index as u8))
    }

    /// All days of the week in order.
    pub fn all() -> impl Iterator<Item = Day> {
        (0..DAYS_PER_WEEK as u8).map(Day)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Short English name.
    pub fn name(self) -> &'static str {
        DAY_NAMES[self.index()]
    }
}

impl TryFrom<u8> for Day {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Day::new(index as usize).ok_or_else(|| {
            format!(
                "day index {} out of range (0..{})",
                index, DAYS_PER_WEEK
            )
        })
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A zero-based period within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Period(u8);

impl Period {
    /// Creates a period from its zero-based index.
    ///
    /// Callers keep `index` below [`MAX_PERIODS_PER_DAY`];
    /// [`TimetableProblem::validate`](crate::TimetableProblem::validate)
    /// rejects classes whose day would be longer.
    pub fn new(index: usize) -> Self {
        debug_assert!(index < MAX_PERIODS_PER_DAY, "period index {index} out of range");
        Self(index as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Periods are shown 1-based, the way timetables print them.
        write!(f, "P{}", self.0 as usize + 1)
    }
}

/// A `(day, period)` cell of the weekly grid.
///
/// Serialized as a `[day, period]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Slot {
    pub day: Day,
    pub period: Period,
}

impl Slot {
    pub fn new(day: Day, period: Period) -> Self {
        Self { day, period }
    }

    /// Builds a slot from raw indices, `None` if the day is out of range.
    pub fn from_indices(day: usize, period: usize) -> Option<Self> {
        Day::new(day).map(|day| Self::new(day, Period::new(period)))
    }
}

impl TryFrom<(u8, u8)> for Slot {
    type Error = String;

    fn try_from((day, period): (u8, u8)) -> Result<Self, Self::Error> {
        Ok(Slot::new(Day::try_from(day)?, Period(period)))
    }
}

impl From<Slot> for (u8, u8) {
    fn from(slot: Slot) -> Self {
        (slot.day.0, slot.period.0)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_per_day_has_floor_of_five() {
        assert_eq!(periods_per_day(0), 5);
        assert_eq!(periods_per_day(25), 5);
        assert_eq!(periods_per_day(30), 6);
        assert_eq!(periods_per_day(31), 7);
    }

    #[test]
    fn test_day_range() {
        assert!(Day::new(4).is_some());
        assert!(Day::new(5).is_none());
        assert_eq!(Day::all().count(), DAYS_PER_WEEK);
        assert_eq!(Day::new(0).unwrap().name(), "Mon");
    }

    #[test]
    fn test_slot_display_is_one_based() {
        let slot = Slot::from_indices(2, 0).unwrap();
        assert_eq!(slot.to_string(), "Wed P1");
    }

    #[test]
    fn test_slot_serde_pair() {
        let slot = Slot::from_indices(1, 3).unwrap();
        let json = serde_json::to_string(&slot).unwrap();
        assert_eq!(json, "[1,3]");

        let back: Slot = serde_json::from_str("[1,3]").unwrap();
        assert_eq!(back, slot);

        let bad: Result<Slot, _> = serde_json::from_str("[7,0]");
        assert!(bad.is_err());
    }
}
