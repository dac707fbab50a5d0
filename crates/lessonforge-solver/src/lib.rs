//! LessonForge Solver - Solve a timetable and explain its cost
//!
//! - [`TimetableSolver`] - Validation, capacity check, model build, backend call
//! - [`SolveResult`] - Status, placed lessons, objective and audit
//! - [`SolverSession`] - Result cache keyed by the content of the input
//!
//! Status mapping from the backend:
//!
//! | Backend | Result |
//! |---|---|
//! | optimal, feasible | `OK` |
//! | infeasible | `INFEASIBLE` |
//! | no solution within the time limit | `ERROR` |

pub mod result;
pub mod session;
pub mod solver;

#[cfg(test)]
mod session_tests;
#[cfg(test)]
mod solver_tests;

pub use result::{SolveResult, SolveStats, SolveStatus};
pub use session::{content_key, SolverSession};
pub use solver::TimetableSolver;
