//! Caller-owned memoization of solve results.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use lessonforge_config::TimetableConfig;
use lessonforge_core::{Result, TimetableProblem};
use lessonforge_model::SolverBackend;
use tracing::debug;

use crate::result::{SolveResult, SolveStatus};
use crate::solver::TimetableSolver;

/// Content hash of a problem and the configuration it is solved with.
pub fn content_key(problem: &TimetableProblem, config: &TimetableConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    problem.hash(&mut hasher);
    config.hash(&mut hasher);
    hasher.finish()
}

/// A [`TimetableSolver`] with a result cache.
///
/// Identical `(problem, config)` pairs are solved once; later calls return a
/// clone of the stored result. Neither `Err` returns nor
/// [`SolveStatus::Error`] results are cached, so a timed out solve is retried.
/// The cache lives as long as the session and is not shared with other
/// sessions.
///
/// # Example
///
/// ```no_run
/// use lessonforge_config::TimetableConfig;
/// use lessonforge_core::{CurriculumItem, TimetableProblem};
/// use lessonforge_solver::{SolverSession, TimetableSolver};
///
/// let problem = TimetableProblem::new()
///     .with_class("6A", 25)
///     .with_item(CurriculumItem::new("Ana", "Math", "6A", 4));
///
/// let mut session = SolverSession::new(TimetableSolver::new(TimetableConfig::default()));
/// let first = session.solve(&problem).unwrap();
/// let second = session.solve(&problem).unwrap();
/// assert_eq!(first, second);
/// assert_eq!(session.hits(), 1);
/// ```
#[derive(Debug)]
pub struct SolverSession<B> {
    solver: TimetableSolver<B>,
    pub(crate) cache: HashMap<u64, CachedSolve>,
    hits: usize,
}

/// A stored result with the input it was solved for.
///
/// The input is compared on lookup, so two inputs sharing a
/// [`content_key`] never see each other's timetable.
#[derive(Debug, Clone)]
pub(crate) struct CachedSolve {
    pub(crate) problem: TimetableProblem,
    pub(crate) config: TimetableConfig,
    pub(crate) result: SolveResult,
}

impl CachedSolve {
    fn matches(&self, problem: &TimetableProblem, config: &TimetableConfig) -> bool {
        self.problem == *problem && self.config == *config
    }
}

impl<B: SolverBackend> SolverSession<B> {
    pub fn new(solver: TimetableSolver<B>) -> Self {
        Self {
            solver,
            cache: HashMap::new(),
            hits: 0,
        }
    }

    pub fn solver(&self) -> &TimetableSolver<B> {
        &self.solver
    }

    /// Solves `problem`, reusing a cached result for identical input.
    ///
    /// # Errors
    ///
    /// Same as [`TimetableSolver::solve`].
    pub fn solve(&mut self, problem: &TimetableProblem) -> Result<SolveResult> {
        let config = self.solver.config();
        let key = content_key(problem, config);
        if let Some(cached) = self.cache.get(&key) {
            if cached.matches(problem, config) {
                self.hits += 1;
                debug!(event = "session_cache_hit", key);
                return Ok(cached.result.clone());
            }
            debug!(event = "session_cache_collision", key);
        }

        let result = self.solver.solve(problem)?;
        if result.status != SolveStatus::Error {
            let entry = CachedSolve {
                problem: problem.clone(),
                config: self.solver.config().clone(),
                result: result.clone(),
            };
            self.cache.insert(key, entry);
        }
        Ok(result)
    }

    /// Number of calls answered from the cache.
    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}
