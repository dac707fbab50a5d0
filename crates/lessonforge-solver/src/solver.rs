//! The timetable solver.
//!
//! Logging levels:
//! - **INFO**: Solve start/end, capacity verdict, model scale
//! - **DEBUG**: Model statistics, per-rule constraint counts
//! - **TRACE**: Individual auxiliary encodings

use std::time::Instant;

use lessonforge_config::TimetableConfig;
use lessonforge_core::{Result, TimetableError, TimetableProblem};
use lessonforge_model::{PumpkinBackend, SolverBackend, SolverStatus};
use lessonforge_scoring::{check_capacity, CapacityReport, TimetableModel};
use tracing::{info, warn};

use crate::result::{SolveResult, SolveStats, SolveStatus};

/// Builds a fresh model per call and hands it to a [`SolverBackend`].
///
/// Holds no per-solve state, so one solver may serve any number of calls,
/// from any thread.
///
/// # Example
///
/// ```no_run
/// use lessonforge_config::TimetableConfig;
/// use lessonforge_core::{CurriculumItem, TimetableProblem};
/// use lessonforge_solver::{SolveStatus, TimetableSolver};
///
/// let problem = TimetableProblem::new()
///     .with_class("6A", 25)
///     .with_item(CurriculumItem::new("Ana", "Math", "6A", 4));
///
/// let solver = TimetableSolver::new(TimetableConfig::default().with_termination_seconds(5));
/// let result = solver.solve(&problem).unwrap();
/// assert_eq!(result.status, SolveStatus::Ok);
/// assert_eq!(result.assignment.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableSolver<B = PumpkinBackend> {
    backend: B,
    config: TimetableConfig,
}

impl TimetableSolver<PumpkinBackend> {
    /// Solver using the Pumpkin backend.
    pub fn new(config: TimetableConfig) -> Self {
        Self::with_backend(PumpkinBackend::new(), config)
    }
}

impl Default for TimetableSolver<PumpkinBackend> {
    fn default() -> Self {
        Self::new(TimetableConfig::default())
    }
}

impl<B: SolverBackend> TimetableSolver<B> {
    pub fn with_backend(backend: B, config: TimetableConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &TimetableConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Validates `problem` and runs the capacity check, without solving.
    ///
    /// # Errors
    ///
    /// [`TimetableError::InvalidInput`] for malformed input. A failing
    /// capacity check is reported in the returned report, not as an error.
    pub fn check(&self, problem: &TimetableProblem) -> Result<CapacityReport> {
        problem.validate()?;
        let report = check_capacity(problem);
        info!(
            event = "capacity_checked",
            teachers = report.teachers.len(),
            critical = report.critical().count(),
            passed = report.passed(),
        );
        Ok(report)
    }

    /// Solves `problem`.
    ///
    /// # Errors
    ///
    /// - [`TimetableError::InvalidInput`] when the problem is malformed.
    /// - [`TimetableError::CapacityExceeded`] when a teacher is overbooked;
    ///   the backend is not invoked.
    /// - [`TimetableError::Model`] when the backend cannot take the model.
    ///
    /// Infeasibility and timeouts are statuses of the returned result.
    pub fn solve(&self, problem: &TimetableProblem) -> Result<SolveResult> {
        let start = Instant::now();
        info!(
            event = "solve_start",
            classes = problem.classes.len(),
            curriculum_items = problem.curriculum.len(),
            backend = self.backend.name(),
            time_limit_ms = self.config.time_limit().as_millis() as u64,
        );

        let report = self.check(problem)?;
        if !report.passed() {
            for teacher in report.critical() {
                warn!(
                    event = "capacity_critical",
                    teacher = %teacher.teacher,
                    required = teacher.required,
                    available = teacher.available,
                );
            }
            return Err(TimetableError::CapacityExceeded(report.shortfalls()));
        }

        let built = TimetableModel::build(problem, &self.config);
        let model_stats = built.model.stats();
        info!(
            event = "model_built",
            variables = model_stats.variables,
            constraints = model_stats.constraints,
            hard_rules = built.hard.total(),
            penalty_terms = built.ledger.len(),
        );

        let remaining = self.config.time_limit().saturating_sub(start.elapsed());
        let outcome = self
            .backend
            .solve(&built.model, remaining)
            .map_err(|e| TimetableError::Model(e.to_string()))?;

        let mut stats = SolveStats {
            backend: self.backend.name().to_string(),
            variables: model_stats.variables,
            constraints: model_stats.constraints,
            penalty_terms: built.ledger.len(),
            elapsed_ms: 0,
            proven_optimal: false,
        };

        let result = match (outcome.status, outcome.solution) {
            (SolverStatus::Optimal | SolverStatus::Feasible, Some(solution)) => {
                let audit = built.ledger.audit(&solution);
                let objective = solution.evaluate(built.model.objective());
                stats.proven_optimal = outcome.status == SolverStatus::Optimal;
                stats.elapsed_ms = start.elapsed().as_millis() as u64;
                SolveResult {
                    status: SolveStatus::Ok,
                    assignment: built.assignment(&solution),
                    objective_value: Some(objective),
                    audit,
                    stats,
                }
            }
            (SolverStatus::Infeasible, _) => {
                stats.elapsed_ms = start.elapsed().as_millis() as u64;
                SolveResult::without_timetable(SolveStatus::Infeasible, stats)
            }
            (status, _) => {
                warn!(event = "solve_no_solution", backend_status = status.as_str());
                stats.elapsed_ms = start.elapsed().as_millis() as u64;
                SolveResult::without_timetable(SolveStatus::Error, stats)
            }
        };

        info!(
            event = "solve_end",
            status = result.status.as_str(),
            objective = result.objective_value,
            lessons = result.assignment.len(),
            triggered_terms = result.audit.len(),
            proven_optimal = result.stats.proven_optimal,
            duration_ms = result.stats.elapsed_ms,
        );

        Ok(result)
    }
}
