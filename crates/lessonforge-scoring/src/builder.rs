//! Assembles the full model of one timetabling problem.

use lessonforge_config::TimetableConfig;
use lessonforge_core::{LessonKey, TimetableProblem};
use lessonforge_model::{Model, Solution};
use tracing::debug;

use crate::analysis::PenaltyLedger;
use crate::grid::LessonGrid;
use crate::hard::{post_hard_constraints, HardConstraintCounts};
use crate::soft::post_soft_constraints;

/// A built model together with the grid and ledger needed to read a
/// solution back.
#[derive(Debug, Clone)]
pub struct TimetableModel {
    pub model: Model,
    pub grid: LessonGrid,
    pub ledger: PenaltyLedger,
    pub hard: HardConstraintCounts,
}

impl TimetableModel {
    /// Grid, hard rules, then soft terms.
    pub fn build(problem: &TimetableProblem, config: &TimetableConfig) -> Self {
        let mut model = Model::new();
        let grid = LessonGrid::build(problem, &mut model);
        let hard = post_hard_constraints(&mut model, &grid, problem, config);
        let ledger = post_soft_constraints(&mut model, &grid, problem, config);

        let stats = model.stats();
        debug!(
            event = "model_stats",
            variables = stats.variables,
            fixed_variables = stats.fixed_variables,
            constraints = stats.constraints,
            objective_terms = stats.objective_terms,
            penalty_terms = ledger.len(),
        );

        Self {
            model,
            grid,
            ledger,
            hard,
        }
    }

    /// Lessons set to 1 in `solution`, in timetable order.
    pub fn assignment(&self, solution: &Solution) -> Vec<LessonKey> {
        let mut keys: Vec<LessonKey> = self
            .grid
            .assigned(solution.values())
            .map(|lesson| lesson.key.clone())
            .collect();
        keys.sort();
        keys
    }
}
