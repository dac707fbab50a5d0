//! Tests for the problem model.

use std::collections::BTreeSet;

use crate::calendar::{Day, Period, Slot};
use crate::error::TimetableError;
use crate::ids::{ClassId, TeacherId};
use crate::problem::*;

fn slot(day: usize, period: usize) -> Slot {
    Slot::from_indices(day, period).unwrap()
}

#[test]
fn test_duplicate_rows_accumulate() {
    let problem = TimetableProblem::new()
        .with_class("7B", 25)
        .with_item(CurriculumItem::new("Ana", "Math", "7B", 3))
        .with_item(CurriculumItem::new("Bruno", "History", "7B", 2))
        .with_item(CurriculumItem::new("Ana", "Math", "7B", 2).with_tag("core"));

    let items = problem.aggregated_curriculum();
    assert_eq!(items.len(), 2);

    let math = items.iter().find(|i| i.subject.as_str() == "Math").unwrap();
    assert_eq!(math.quantity, 5);
    assert!(math.tags.contains("core"));
}

#[test]
fn test_school_max_periods() {
    let problem = TimetableProblem::new()
        .with_class("6A", 25)
        .with_class("3M", 30);
    assert_eq!(problem.school_max_periods_per_day(), 6);
    assert_eq!(problem.school_slots_per_week(), 30);

    let empty = TimetableProblem::new();
    assert_eq!(empty.school_max_periods_per_day(), 5);
}

#[test]
fn test_class_group_slots() {
    let problem = TimetableProblem::new().with_class("6A", 25);
    let group = problem.class_group(&ClassId::from("6A")).unwrap();
    assert!(group.has_slot(slot(0, 4)));
    assert!(!group.has_slot(slot(0, 5)));
}

#[test]
fn test_teacher_resolution_uses_default_quota() {
    let problem = TimetableProblem::new()
        .with_block("Ana", slot(1, 2))
        .with_free_quota("Bruno", 0);

    let ana = problem.teacher(&TeacherId::from("Ana"), DEFAULT_FREE_QUOTA);
    assert!(ana.is_blocked(slot(1, 2)));
    assert_eq!(ana.free_quota, 2);

    let bruno = problem.teacher(&TeacherId::from("Bruno"), DEFAULT_FREE_QUOTA);
    assert_eq!(bruno.free_quota, 0);
    assert!(bruno.blocks.is_empty());
}

#[test]
fn test_validate_rejects_unknown_class() {
    let problem = TimetableProblem::new()
        .with_class("6A", 25)
        .with_item(CurriculumItem::new("Ana", "Math", "9Z", 3));

    match problem.validate() {
        Err(TimetableError::InvalidInput(msg)) => assert!(msg.contains("9Z")),
        other => panic!("expected invalid input, got {:?}", other),
    }
}

#[test]
fn test_validate_rejects_days_longer_than_a_period_index() {
    // 1280 lessons is 256 periods a day, the longest indexable day.
    let longest = TimetableProblem::new().with_class("Big", 1280);
    assert!(longest.validate().is_ok());

    let too_long = TimetableProblem::new()
        .with_class("6A", 25)
        .with_class("Big", 1300);
    match too_long.validate() {
        Err(TimetableError::InvalidInput(msg)) => assert!(msg.contains("Big")),
        other => panic!("expected invalid input, got {:?}", other),
    }
}

#[test]
fn test_validate_rejects_degenerate_groups() {
    let base = TimetableProblem::new().with_class("6A", 25);

    let lonely_sync = base.clone().with_sync_group(SyncGroup::new(["Arts"]));
    assert!(lonely_sync.validate().is_err());

    let late_fixed = base.clone().with_fixed_slot_group(FixedSlotGroup::new(
        ["Elective"],
        [Day::new(0).unwrap()],
        Period::new(7),
    ));
    assert!(late_fixed.validate().is_err());

    let fine = base.with_sync_group(SyncGroup::new(["Arts", "PE"]));
    assert!(fine.validate().is_ok());
}

#[test]
fn test_group_membership_by_subject_or_tag() {
    let item = CurriculumItem::new("Carla", "Visual Arts", "6A", 2).with_tag("arts");
    let group = FixedSlotGroup::new(["arts"], [Day::new(0).unwrap()], Period::new(3));

    assert!(item.in_group("Visual Arts"));
    assert!(item.in_group("arts"));
    assert!(!item.in_group("Arts"));
    assert!(group.matches(&item));
    assert!(group.reserves(slot(0, 3)));
    assert!(!group.reserves(slot(1, 3)));
}

#[test]
fn test_problem_json_shape() {
    let json = r#"{
        "classes": {"6A": 25},
        "curriculum": [
            {"teacher": "Ana", "subject": "Math", "class": "6A", "quantity": 5}
        ],
        "teacher_blocks": {"Ana": [[0, 0], [4, 2]]},
        "sync_groups": [["Arts", "PE"]]
    }"#;

    let problem: TimetableProblem = serde_json::from_str(json).unwrap();
    assert_eq!(problem.curriculum[0].quantity, 5);
    assert_eq!(problem.teacher_blocks[&TeacherId::from("Ana")].len(), 2);
    assert_eq!(
        problem.sync_groups[0].members,
        ["Arts", "PE"].iter().map(|s| s.to_string()).collect::<BTreeSet<_>>()
    );
    assert!(problem.validate().is_ok());
}
