//! End-to-end solver tests.

use lessonforge_config::TimetableConfig;
use lessonforge_core::{
    ClassId, CurriculumItem, PenaltyCategory, TimetableError, TimetableProblem,
};
use lessonforge_model::{PumpkinBackend, SolverStatus};
use lessonforge_test::problems::{
    dense_two_classes, elective_block, overbooked_teacher, single_item, synced_arts,
};
use lessonforge_test::verify::{subject_days, teacher_days};
use lessonforge_test::{slot, verify_assignment, CountingBackend, StubBackend};

use crate::result::SolveStatus;
use crate::solver::TimetableSolver;

fn counting_solver(config: TimetableConfig) -> TimetableSolver<CountingBackend<PumpkinBackend>> {
    TimetableSolver::with_backend(CountingBackend::new(PumpkinBackend::new()), config)
}

fn quick() -> TimetableConfig {
    TimetableConfig::default().with_termination_seconds(20)
}

#[test]
fn test_overbooked_teacher_never_reaches_backend() {
    let solver = counting_solver(quick());

    let err = solver.solve(&overbooked_teacher()).unwrap_err();
    match err {
        TimetableError::CapacityExceeded(shortfalls) => {
            assert_eq!(shortfalls.len(), 1);
            assert_eq!(shortfalls[0].teacher.as_str(), "Ana");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(solver.backend().calls(), 0);

    let report = solver.check(&overbooked_teacher()).unwrap();
    assert!(!report.passed());
}

#[test]
fn test_invalid_input_never_reaches_backend() {
    let solver = counting_solver(quick());
    let problem = TimetableProblem::new()
        .with_class("6A", 25)
        .with_item(CurriculumItem::new("Ana", "Math", "9Z", 2));

    let err = solver.solve(&problem).unwrap_err();
    assert!(matches!(err, TimetableError::InvalidInput(_)));
    assert_eq!(solver.backend().calls(), 0);
}

#[test]
fn test_dense_week_fills_every_slot() {
    let config = quick().with_double_period_weight(0);
    let solver = counting_solver(config);
    let problem = dense_two_classes();

    let result = solver.solve(&problem).unwrap();
    assert_eq!(result.status, SolveStatus::Ok);
    assert_eq!(solver.backend().calls(), 1);

    assert_eq!(result.assignment.len(), 50);
    assert!(verify_assignment(&problem, &result.assignment).is_empty());
    for class in ["6A", "6B"] {
        let class = ClassId::from(class);
        assert_eq!(result.class_lessons(&class).count(), 25);
    }

    assert_eq!(Some(result.audit_total()), result.objective_value);
    if result.stats.proven_optimal {
        // a zero-cost week exists for this problem
        assert_eq!(result.objective_value, Some(0));
        assert!(result.audit.is_empty());
    }
}

#[test]
fn test_no_adjacent_lessons_without_doubles() {
    let solver = TimetableSolver::new(quick().with_double_periods(false));
    let problem = single_item(3);

    let result = solver.solve(&problem).unwrap();
    assert_eq!(result.status, SolveStatus::Ok);
    assert!(verify_assignment(&problem, &result.assignment).is_empty());

    for periods in teacher_days(&result.assignment, "Ana").values() {
        for pair in periods.windows(2) {
            assert!(pair[1] > pair[0] + 1, "adjacent lessons at {:?}", periods);
        }
    }
    assert!(!result
        .audit
        .iter()
        .any(|e| e.category == PenaltyCategory::DoublePeriod));
}

#[test]
fn test_sync_penalty_matches_disagreeing_days() {
    let solver = TimetableSolver::new(quick());
    let problem = synced_arts();

    let result = solver.solve(&problem).unwrap();
    assert_eq!(result.status, SolveStatus::Ok);
    assert!(verify_assignment(&problem, &result.assignment).is_empty());

    let art = subject_days(&result.assignment, "7B", "Art");
    let music = subject_days(&result.assignment, "7B", "Music");
    let disagreeing = art.symmetric_difference(&music).count();

    let sync: Vec<_> = result
        .audit
        .iter()
        .filter(|e| e.category == PenaltyCategory::SyncDisagreement)
        .collect();
    assert_eq!(sync.len(), disagreeing);
    assert!(sync.iter().all(|e| e.cost == 10 && e.weight == 10));
    assert_eq!(Some(result.audit_total()), result.objective_value);
}

#[test]
fn test_fixed_slot_keeps_other_subjects_out() {
    let solver = TimetableSolver::new(quick());
    let problem = elective_block();

    let result = solver.solve(&problem).unwrap();
    assert_eq!(result.status, SolveStatus::Ok);

    let reserved = slot(0, 2);
    let at_reserved: Vec<&str> = result
        .assignment
        .iter()
        .filter(|l| l.slot() == reserved)
        .map(|l| l.subject.as_str())
        .collect();
    assert_eq!(at_reserved, vec!["Robotics"]);
    assert!(verify_assignment(&problem, &result.assignment).is_empty());
}

#[test]
fn test_unsatisfiable_model_is_infeasible() {
    // The only slot Robotics may use is blocked for its teacher.
    let problem = elective_block().with_block("Fabio", slot(0, 2));
    let solver = TimetableSolver::new(quick());

    let result = solver.solve(&problem).unwrap();
    assert_eq!(result.status, SolveStatus::Infeasible);
    assert!(result.assignment.is_empty());
    assert!(result.audit.is_empty());
    assert_eq!(result.objective_value, None);
}

#[test]
fn test_timeout_without_solution_is_error() {
    let solver = TimetableSolver::with_backend(StubBackend::new(SolverStatus::Unknown), quick());

    let result = solver.solve(&single_item(2)).unwrap();
    assert_eq!(result.status, SolveStatus::Error);
    assert!(result.assignment.is_empty());
    assert!(!result.stats.proven_optimal);
    assert_eq!(result.stats.backend, "stub");
}

#[test]
fn test_feasible_counts_as_ok_but_not_proven() {
    let solver = TimetableSolver::with_backend(StubBackend::new(SolverStatus::Feasible), quick());

    let result = solver.solve(&single_item(2)).unwrap();
    assert_eq!(result.status, SolveStatus::Ok);
    assert!(!result.stats.proven_optimal);
    assert!(result.objective_value.is_some());
}

#[test]
fn test_empty_curriculum_is_trivially_ok() {
    let solver = TimetableSolver::new(quick());
    let problem = TimetableProblem::new().with_class("6A", 25);

    let result = solver.solve(&problem).unwrap();
    assert_eq!(result.status, SolveStatus::Ok);
    assert!(result.assignment.is_empty());
    assert_eq!(result.objective_value, Some(0));
}

#[test]
fn test_result_serializes_status_in_caps() {
    let solver = TimetableSolver::with_backend(StubBackend::new(SolverStatus::Infeasible), quick());
    let result = solver.solve(&single_item(2)).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["status"], "INFEASIBLE");
    assert_eq!(json["assignment"].as_array().unwrap().len(), 0);
}
