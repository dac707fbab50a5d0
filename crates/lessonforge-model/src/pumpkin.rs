//! Backend running the Pumpkin lazy clause generation solver.
//!
//! Every model variable becomes a bounded integer domain, every linear
//! constraint a Pumpkin linear constraint, and the objective is tied to one
//! extra variable that linear SAT-UNSAT search minimizes.

use std::time::{Duration, Instant};

use pumpkin_solver::constraints as cp;
use pumpkin_solver::optimisation::linear_sat_unsat::LinearSatUnsat;
use pumpkin_solver::optimisation::OptimisationDirection;
use pumpkin_solver::results::{OptimisationResult, ProblemSolution};
use pumpkin_solver::termination::TimeBudget;
use pumpkin_solver::variables::{DomainId, TransformableVariable};
use pumpkin_solver::Solver;
use tracing::{debug, trace};

use crate::backend::{Solution, SolverBackend, SolverOutcome, SolverStatus};
use crate::error::ModelError;
use crate::model::{Model, Relation};

/// [`SolverBackend`] backed by `pumpkin-solver`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PumpkinBackend;

impl PumpkinBackend {
    pub fn new() -> Self {
        Self
    }
}

fn narrow(value: i64, context: impl FnOnce() -> String) -> Result<i32, ModelError> {
    i32::try_from(value).map_err(|_| ModelError::Overflow {
        value,
        context: context(),
    })
}

fn noop_callback<B>(_: &Solver, _: pumpkin_solver::results::SolutionReference, _: &B) {}

fn read_values<S: ProblemSolution>(solution: &S, domains: &[DomainId]) -> Vec<i64> {
    domains
        .iter()
        .map(|&domain| solution.get_integer_value(domain) as i64)
        .collect()
}

impl SolverBackend for PumpkinBackend {
    fn name(&self) -> &'static str {
        "pumpkin"
    }

    fn solve(&self, model: &Model, time_limit: Duration) -> Result<SolverOutcome, ModelError> {
        let start = Instant::now();

        if model.has_empty_domain() {
            debug!(event = "backend_trivially_infeasible");
            return Ok(SolverOutcome::infeasible());
        }

        if model.variables().is_empty() {
            let values = Vec::new();
            return Ok(SolverOutcome::solved(
                SolverStatus::Optimal,
                Solution::new(values),
            ));
        }

        let mut solver = Solver::default();
        let constraint_tag = solver.new_constraint_tag();

        let mut domains = Vec::with_capacity(model.variables().len());
        for variable in model.variables() {
            let lb = narrow(variable.lb, || format!("lower bound of {}", variable.name))?;
            let ub = narrow(variable.ub, || format!("upper bound of {}", variable.name))?;
            domains.push(solver.new_bounded_integer(lb, ub));
        }

        for constraint in model.constraints() {
            if constraint.expr.terms().is_empty() {
                // 0 <relation> rhs
                if !constraint.is_satisfied(&[]) {
                    debug!(event = "backend_trivially_infeasible", tag = constraint.tag);
                    return Ok(SolverOutcome::infeasible());
                }
                continue;
            }

            let mut terms = Vec::with_capacity(constraint.expr.terms().len());
            for &(var, coefficient) in constraint.expr.terms() {
                let scale = narrow(coefficient, || format!("coefficient in {}", constraint.tag))?;
                terms.push(domains[var.index()].scaled(scale));
            }
            let rhs = narrow(constraint.rhs, || format!("right-hand side of {}", constraint.tag))?;

            let posted = match constraint.relation {
                Relation::LessOrEqual => solver
                    .add_constraint(cp::less_than_or_equals(terms, rhs, constraint_tag))
                    .post(),
                Relation::GreaterOrEqual => solver
                    .add_constraint(cp::greater_than_or_equals(terms, rhs, constraint_tag))
                    .post(),
                Relation::Equal => solver
                    .add_constraint(cp::equals(terms, rhs, constraint_tag))
                    .post(),
            };
            if posted.is_err() {
                // Root propagation already found a conflict.
                debug!(event = "backend_root_conflict", tag = constraint.tag);
                return Ok(SolverOutcome::infeasible());
            }
        }

        // objective - Σ c·x == 0, constant kept outside the solver
        let objective = model.objective().simplified();
        let (lo, hi) = model.bounds(&objective);
        let constant = objective.constant_part();
        let objective_var = solver.new_bounded_integer(
            narrow(lo - constant, || "objective lower bound".to_string())?,
            narrow(hi - constant, || "objective upper bound".to_string())?,
        );
        let mut terms = vec![objective_var.scaled(-1)];
        for &(var, coefficient) in objective.terms() {
            let scale = narrow(coefficient, || "objective coefficient".to_string())?;
            terms.push(domains[var.index()].scaled(scale));
        }
        if solver
            .add_constraint(cp::equals(terms, 0, constraint_tag))
            .post()
            .is_err()
        {
            return Ok(SolverOutcome::infeasible());
        }

        trace!(
            event = "backend_model_posted",
            variables = domains.len(),
            constraints = model.constraints().len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
        );

        let remaining = time_limit.saturating_sub(start.elapsed());
        let mut brancher = solver.default_brancher();
        let mut termination = TimeBudget::starting_now(remaining);

        let result = solver.optimise(
            &mut brancher,
            &mut termination,
            LinearSatUnsat::new(OptimisationDirection::Minimise, objective_var, noop_callback),
        );

        let outcome = match result {
            OptimisationResult::Optimal(solution) => SolverOutcome::solved(
                SolverStatus::Optimal,
                Solution::new(read_values(&solution, &domains)),
            ),
            OptimisationResult::Satisfiable(solution) => SolverOutcome::solved(
                SolverStatus::Feasible,
                Solution::new(read_values(&solution, &domains)),
            ),
            OptimisationResult::Unsatisfiable => SolverOutcome::infeasible(),
            OptimisationResult::Unknown => SolverOutcome::unknown(),
        };

        debug!(
            event = "backend_done",
            status = outcome.status.as_str(),
            duration_ms = start.elapsed().as_millis() as u64,
        );

        Ok(outcome)
    }
}
