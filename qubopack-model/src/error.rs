use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The slack bit-count is only defined when the capacity strictly
    /// exceeds the total item weight.
    #[error("capacity ({capacity}) must exceed the total item weight ({total_weight})")]
    InvalidCapacity { capacity: f64, total_weight: f64 },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("malformed solution: {0}")]
    MalformedSolution(String),
}
