//! Tests for the text views.

use lessonforge_core::{ClassId, LessonKey, PenaltyCategory};
use lessonforge_scoring::{check_capacity, AuditEntry};
use lessonforge_solver::{SolveResult, SolveStats, SolveStatus};
use lessonforge_test::problems::{overbooked_teacher, single_item};
use lessonforge_test::slot;

use crate::render::{audit_table, capacity_table, class_grid, class_grids, teacher_load};

fn lesson(day: usize, period: usize) -> LessonKey {
    let at = slot(day, period);
    LessonKey::new(
        "6A".into(),
        at.day,
        at.period,
        "Ana".into(),
        "Math".into(),
    )
}

fn result_with(assignment: Vec<LessonKey>, audit: Vec<AuditEntry>) -> SolveResult {
    let objective = audit.iter().map(|e| e.cost).sum();
    SolveResult {
        status: SolveStatus::Ok,
        assignment,
        objective_value: Some(objective),
        audit,
        stats: SolveStats::default(),
    }
}

fn single_day_entry() -> AuditEntry {
    AuditEntry {
        category: PenaltyCategory::SingleLessonDay,
        description: "Ana on Mon: single lesson".to_string(),
        weight: 1000,
        value: 1,
        cost: 1000,
    }
}

#[test]
fn test_class_grid_places_lessons() {
    let problem = single_item(2);
    let result = result_with(vec![lesson(0, 0), lesson(2, 3)], Vec::new());

    let grid = class_grid(&problem, &result, &ClassId::from("6A"));
    let lines: Vec<&str> = grid.lines().collect();

    assert!(lines[0].starts_with("Class 6A"));
    assert!(lines[1].contains("Mon") && lines[1].contains("Fri"));
    // header, title and rule, then one line per period
    assert_eq!(lines.len(), 3 + 5);
    assert!(lines[3].starts_with("   P1 | Math (Ana)"));
    assert!(lines[6].contains("Math (Ana)"));
    assert!(!lines[4].contains("Math"));
}

#[test]
fn test_class_grid_unknown_class() {
    let problem = single_item(2);
    let result = result_with(Vec::new(), Vec::new());

    let grid = class_grid(&problem, &result, &ClassId::from("9Z"));
    assert!(grid.contains("unknown class"));
}

#[test]
fn test_class_grids_cover_every_class() {
    let problem = single_item(1).with_class("6B", 25);
    let result = result_with(vec![lesson(1, 0)], Vec::new());

    let text = class_grids(&problem, &result);
    assert!(text.contains("Class 6A"));
    assert!(text.contains("Class 6B"));
}

#[test]
fn test_teacher_load_counts_per_day() {
    let problem = single_item(3);
    let result = result_with(vec![lesson(0, 0), lesson(0, 1), lesson(3, 2)], Vec::new());

    let table = teacher_load(&problem, &result);
    let ana = table.lines().find(|l| l.contains("Ana")).unwrap();
    let cells: Vec<&str> = ana.split('|').map(str::trim).collect();

    assert_eq!(cells, vec!["Ana", "2", "0", "0", "1", "0", "3"]);
}

#[test]
fn test_audit_table_lists_terms_and_total() {
    let result = result_with(vec![lesson(0, 0)], vec![single_day_entry()]);

    let table = audit_table(&result);
    assert!(table.contains("Ana on Mon: single lesson"));
    assert!(table.contains("Single lesson day"));
    assert!(table.contains("Total cost: 1000"));
}

#[test]
fn test_empty_audit() {
    let result = result_with(Vec::new(), Vec::new());
    assert!(audit_table(&result).contains("no penalties triggered"));
}

#[test]
fn test_capacity_table_shows_critical_teacher() {
    let report = check_capacity(&overbooked_teacher());

    let table = capacity_table(&report);
    let ana = table.lines().find(|l| l.contains("Ana")).unwrap();
    assert!(ana.contains("CRITICAL"));
}
