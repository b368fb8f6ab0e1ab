//! Error taxonomy for the planner

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    /// The solver terminated without an optimal solution.
    #[error("no optimal solution found (solver status: {status})")]
    SolutionNotFound { status: String },

    /// A prototype carries a value that would put a non-finite coefficient
    /// into the linear program.
    #[error("malformed prototype '{name}': {reason}")]
    MalformedPrototype { name: String, reason: String },

    /// A per-unit constraint referenced a unit outside the production map.
    #[error("unknown production unit id {0}")]
    UnknownUnit(usize),

    /// An item target referenced an item no production unit touches.
    #[error("no production unit references item '{0}'")]
    UnknownItem(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
