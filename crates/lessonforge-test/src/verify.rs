//! Independent check of a solved timetable.
//!
//! Recomputes the hard rules from the assignment alone, without looking at
//! the model that produced it.

use std::collections::{BTreeMap, BTreeSet};

use lessonforge_core::{ClassId, Day, LessonKey, Slot, SubjectId, TeacherId, TimetableProblem};

/// A broken hard rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    ClassClash { class: ClassId, slot: Slot },
    TeacherClash { teacher: TeacherId, slot: Slot },
    WrongLoad {
        class: ClassId,
        teacher: TeacherId,
        subject: SubjectId,
        expected: u32,
        actual: u32,
    },
    BlockedSlot { teacher: TeacherId, slot: Slot },
    OutsideDay { lesson: LessonKey },
    UnknownItem { lesson: LessonKey },
}

/// Every hard rule `assignment` breaks for `problem`.
pub fn verify_assignment(problem: &TimetableProblem, assignment: &[LessonKey]) -> Vec<Violation> {
    let mut violations = Vec::new();

    let mut class_cells: BTreeMap<(&ClassId, Slot), usize> = BTreeMap::new();
    let mut teacher_cells: BTreeMap<(&TeacherId, Slot), usize> = BTreeMap::new();
    let mut loads: BTreeMap<(&ClassId, &TeacherId, &SubjectId), u32> = BTreeMap::new();

    let items = problem.aggregated_curriculum();
    let known: BTreeSet<(&ClassId, &TeacherId, &SubjectId)> = items
        .iter()
        .map(|i| (&i.class, &i.teacher, &i.subject))
        .collect();

    for lesson in assignment {
        let slot = lesson.slot();
        *class_cells.entry((&lesson.class, slot)).or_default() += 1;
        *teacher_cells.entry((&lesson.teacher, slot)).or_default() += 1;
        *loads
            .entry((&lesson.class, &lesson.teacher, &lesson.subject))
            .or_default() += 1;

        if !known.contains(&(&lesson.class, &lesson.teacher, &lesson.subject)) {
            violations.push(Violation::UnknownItem {
                lesson: lesson.clone(),
            });
        }
        let inside = problem
            .class_group(&lesson.class)
            .is_some_and(|group| group.has_slot(slot));
        if !inside {
            violations.push(Violation::OutsideDay {
                lesson: lesson.clone(),
            });
        }
        let blocked = problem
            .teacher_blocks
            .get(&lesson.teacher)
            .is_some_and(|blocks| blocks.contains(&slot));
        if blocked {
            violations.push(Violation::BlockedSlot {
                teacher: lesson.teacher.clone(),
                slot,
            });
        }
    }

    for ((class, slot), count) in class_cells {
        if count > 1 {
            violations.push(Violation::ClassClash {
                class: class.clone(),
                slot,
            });
        }
    }
    for ((teacher, slot), count) in teacher_cells {
        if count > 1 {
            violations.push(Violation::TeacherClash {
                teacher: teacher.clone(),
                slot,
            });
        }
    }
    for item in &items {
        let actual = loads
            .get(&(&item.class, &item.teacher, &item.subject))
            .copied()
            .unwrap_or(0);
        if actual != item.quantity {
            violations.push(Violation::WrongLoad {
                class: item.class.clone(),
                teacher: item.teacher.clone(),
                subject: item.subject.clone(),
                expected: item.quantity,
                actual,
            });
        }
    }

    violations
}

/// Periods (zero-based) a teacher teaches on each day.
pub fn teacher_days(assignment: &[LessonKey], teacher: &str) -> BTreeMap<Day, Vec<usize>> {
    let mut days: BTreeMap<Day, Vec<usize>> = BTreeMap::new();
    for lesson in assignment.iter().filter(|l| l.teacher.as_str() == teacher) {
        days.entry(lesson.day).or_default().push(lesson.period.index());
    }
    for periods in days.values_mut() {
        periods.sort_unstable();
    }
    days
}

/// Days on which `class` has at least one lesson matching `subject`.
pub fn subject_days(assignment: &[LessonKey], class: &str, subject: &str) -> BTreeSet<Day> {
    assignment
        .iter()
        .filter(|l| l.class.as_str() == class && l.subject.as_str() == subject)
        .map(|l| l.day)
        .collect()
}
