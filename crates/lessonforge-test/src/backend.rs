//! Backend doubles.
//!
//! # Example
//!
//! ```
//! use lessonforge_model::{Model, SolverBackend, SolverStatus};
//! use lessonforge_test::backend::{CountingBackend, StubBackend};
//! use std::time::Duration;
//!
//! let backend = CountingBackend::new(StubBackend::new(SolverStatus::Unknown));
//! let outcome = backend.solve(&Model::new(), Duration::from_millis(10)).unwrap();
//! assert_eq!(outcome.status, SolverStatus::Unknown);
//! assert_eq!(backend.calls(), 1);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use lessonforge_model::{
    Model, ModelError, Solution, SolverBackend, SolverOutcome, SolverStatus,
};

/// Wraps a backend and counts `solve` calls.
#[derive(Debug, Default)]
pub struct CountingBackend<B> {
    inner: B,
    calls: AtomicUsize,
}

impl<B> CountingBackend<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<B: SolverBackend> SolverBackend for CountingBackend<B> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn solve(&self, model: &Model, time_limit: Duration) -> Result<SolverOutcome, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.solve(model, time_limit)
    }
}

/// Answers every model with a fixed status.
///
/// Statuses with a solution return each variable at its lower bound.
#[derive(Debug, Clone, Copy)]
pub struct StubBackend {
    status: SolverStatus,
}

impl StubBackend {
    pub fn new(status: SolverStatus) -> Self {
        Self { status }
    }
}

impl SolverBackend for StubBackend {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn solve(&self, model: &Model, _time_limit: Duration) -> Result<SolverOutcome, ModelError> {
        Ok(match self.status {
            SolverStatus::Infeasible => SolverOutcome::infeasible(),
            SolverStatus::Unknown => SolverOutcome::unknown(),
            status => {
                let values = model.variables().iter().map(|v| v.lb).collect();
                SolverOutcome::solved(status, Solution::new(values))
            }
        })
    }
}
