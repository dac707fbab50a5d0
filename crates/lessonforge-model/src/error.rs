//! Error types for model construction and solving

use thiserror::Error;

/// Error raised while translating or solving a model
#[derive(Debug, Error)]
pub enum ModelError {
    /// A bound or coefficient does not fit the backend's integer width
    #[error("Value {value} in {context} exceeds the solver's integer range")]
    Overflow { value: i64, context: String },

    /// The backend failed for a reason other than infeasibility
    #[error("Solver backend error: {0}")]
    Backend(String),
}
