//! Timetabling problem fixtures.
//!
//! # Example
//!
//! ```
//! use lessonforge_test::problems::dense_two_classes;
//!
//! let problem = dense_two_classes();
//! assert!(problem.validate().is_ok());
//! assert_eq!(problem.classes.len(), 2);
//! ```

use lessonforge_core::{
    CurriculumItem, Day, FixedSlotGroup, Period, Slot, SyncGroup, TimetableProblem,
};

/// Shorthand for a slot from zero-based indices.
///
/// # Panics
///
/// Panics when `day` is not a weekday index.
pub fn slot(day: usize, period: usize) -> Slot {
    Slot::from_indices(day, period).expect("day index within the week")
}

/// One class, one teacher, nothing else.
pub fn single_item(quantity: u32) -> TimetableProblem {
    TimetableProblem::new()
        .with_class("6A", 25)
        .with_item(CurriculumItem::new("Ana", "Math", "6A", quantity))
}

/// A teacher whose 25 lessons cannot fit once one slot is blocked.
pub fn overbooked_teacher() -> TimetableProblem {
    TimetableProblem::new()
        .with_class("6A", 25)
        .with_item(CurriculumItem::new("Ana", "Math", "6A", 25))
        .with_block("Ana", slot(0, 0))
}

/// Two full classes shared by three teachers.
///
/// Ana and Bruno teach four lessons a day, Carla two, and a zero-cost week
/// exists: per day 6A runs Ana Ana Bruno Bruno Carla and 6B runs
/// Bruno Bruno Carla Ana Ana.
pub fn dense_two_classes() -> TimetableProblem {
    TimetableProblem::new()
        .with_class("6A", 25)
        .with_class("6B", 25)
        .with_item(CurriculumItem::new("Ana", "Math", "6A", 10))
        .with_item(CurriculumItem::new("Bruno", "History", "6A", 10))
        .with_item(CurriculumItem::new("Carla", "Science", "6A", 5))
        .with_item(CurriculumItem::new("Ana", "Math", "6B", 10))
        .with_item(CurriculumItem::new("Bruno", "History", "6B", 10))
        .with_item(CurriculumItem::new("Carla", "Science", "6B", 5))
}

/// Art and Music in one class, grouped for synchronization.
pub fn synced_arts() -> TimetableProblem {
    TimetableProblem::new()
        .with_class("7B", 25)
        .with_item(CurriculumItem::new("Dora", "Art", "7B", 2))
        .with_item(CurriculumItem::new("Eva", "Music", "7B", 2))
        .with_item(CurriculumItem::new("Ana", "Math", "7B", 5))
        .with_sync_group(SyncGroup::new(["Art", "Music"]))
}

/// Elective block reserved on Monday third period; the class also takes
/// Geography.
pub fn elective_block() -> TimetableProblem {
    TimetableProblem::new()
        .with_class("1M", 30)
        .with_item(CurriculumItem::new("Fabio", "Robotics", "1M", 1).with_tag("elective"))
        .with_item(CurriculumItem::new("Gina", "Geography", "1M", 5))
        .with_fixed_slot_group(FixedSlotGroup::new(
            ["elective"],
            Day::new(0),
            Period::new(2),
        ))
}
