//! Tests for the session cache.

use lessonforge_config::TimetableConfig;
use lessonforge_model::SolverStatus;
use lessonforge_test::problems::{overbooked_teacher, single_item};
use lessonforge_test::{CountingBackend, StubBackend};

use crate::result::SolveStatus;
use crate::session::{content_key, SolverSession};
use crate::solver::TimetableSolver;

fn session() -> SolverSession<CountingBackend<StubBackend>> {
    let backend = CountingBackend::new(StubBackend::new(SolverStatus::Optimal));
    SolverSession::new(TimetableSolver::with_backend(
        backend,
        TimetableConfig::default(),
    ))
}

#[test]
fn test_identical_input_hits_cache() {
    let mut session = session();
    let problem = single_item(2);

    let first = session.solve(&problem).unwrap();
    let second = session.solve(&problem.clone()).unwrap();

    assert_eq!(first, second);
    assert_eq!(session.solver().backend().calls(), 1);
    assert_eq!(session.hits(), 1);
    assert_eq!(session.len(), 1);
}

#[test]
fn test_different_input_misses_cache() {
    let mut session = session();

    session.solve(&single_item(2)).unwrap();
    session.solve(&single_item(3)).unwrap();

    assert_eq!(session.solver().backend().calls(), 2);
    assert_eq!(session.hits(), 0);
    assert_eq!(session.len(), 2);
}

#[test]
fn test_errors_are_not_cached() {
    let mut session = session();

    assert!(session.solve(&overbooked_teacher()).is_err());
    assert!(session.solve(&overbooked_teacher()).is_err());
    assert!(session.is_empty());
    assert_eq!(session.hits(), 0);
}

#[test]
fn test_timed_out_solve_is_retried() {
    let backend = CountingBackend::new(StubBackend::new(SolverStatus::Unknown));
    let mut session = SolverSession::new(TimetableSolver::with_backend(
        backend,
        TimetableConfig::default(),
    ));
    let problem = single_item(2);

    let first = session.solve(&problem).unwrap();
    let second = session.solve(&problem).unwrap();

    assert_eq!(first.status, SolveStatus::Error);
    assert_eq!(second.status, SolveStatus::Error);
    assert_eq!(session.solver().backend().calls(), 2);
    assert_eq!(session.hits(), 0);
    assert!(session.is_empty());
}

#[test]
fn test_colliding_key_is_not_served_another_problem() {
    let mut session = session();
    let cached = single_item(2);
    let other = single_item(3);
    session.solve(&cached).unwrap();

    // File the stored entry under the other problem's key.
    let old_key = content_key(&cached, &TimetableConfig::default());
    let entry = session.cache.remove(&old_key).unwrap();
    session
        .cache
        .insert(content_key(&other, &TimetableConfig::default()), entry);

    session.solve(&other).unwrap();

    assert_eq!(session.hits(), 0);
    assert_eq!(session.solver().backend().calls(), 2);
}

#[test]
fn test_clear_forces_a_new_solve() {
    let mut session = session();
    let problem = single_item(2);

    session.solve(&problem).unwrap();
    session.clear();
    session.solve(&problem).unwrap();

    assert_eq!(session.solver().backend().calls(), 2);
}

#[test]
fn test_key_depends_on_config() {
    let problem = single_item(2);
    let default = TimetableConfig::default();
    let no_doubles = TimetableConfig::default().with_double_periods(false);

    assert_eq!(content_key(&problem, &default), content_key(&problem, &default));
    assert_ne!(content_key(&problem, &default), content_key(&problem, &no_doubles));
}
