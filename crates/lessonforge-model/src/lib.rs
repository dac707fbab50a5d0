//! LessonForge Model - Integer linear models and the solver seam
//!
//! The timetabling engine never searches for solutions itself. It describes
//! the problem as a [`Model`] of bounded integer variables, linear
//! constraints and a linear objective, then hands the model to a
//! [`SolverBackend`].
//!
//! - [`expr`] - Variables and linear expressions
//! - [`model`] - The model container and its statistics
//! - [`reify`] - Exact linear encodings of indicators (`[x >= k]`, `max(0, x)`, ...)
//! - [`backend`] - The `solve(model, time_limit)` capability
//! - [`pumpkin`] - Backend running the Pumpkin constraint solver
//!
//! # Example
//!
//! ```no_run
//! use lessonforge_model::{LinearExpr, Model, PumpkinBackend, SolverBackend};
//! use std::time::Duration;
//!
//! let mut model = Model::new();
//! let x = model.new_bool("x");
//! let y = model.new_bool("y");
//! model.add_le(LinearExpr::sum([x, y]), 1, "at_most_one");
//! model.add_objective_term(LinearExpr::from(x), -1);
//!
//! let outcome = PumpkinBackend::new()
//!     .solve(&model, Duration::from_secs(1))
//!     .unwrap();
//! assert!(outcome.status.has_solution());
//! ```

pub mod backend;
pub mod error;
pub mod expr;
pub mod model;
pub mod pumpkin;
pub mod reify;

#[cfg(test)]
mod reify_tests;

pub use backend::{Solution, SolverBackend, SolverOutcome, SolverStatus};
pub use error::ModelError;
pub use expr::{LinearExpr, VarId};
pub use model::{LinearConstraint, Model, ModelStats, Relation, Variable};
pub use pumpkin::PumpkinBackend;
