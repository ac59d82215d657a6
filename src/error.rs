use thiserror::Error;

/// Failure of an objective evaluation.
///
/// Fatal for the current solve: the driver surfaces it immediately instead
/// of retrying.
#[derive(Debug, Clone, Error)]
pub enum EvalError {
    /// The point lies outside the objective's domain.
    #[error("point outside the objective's domain: {0}")]
    Domain(String),
    /// Evaluation produced a NaN or infinite value.
    #[error("objective evaluation produced a non-finite value")]
    NonFinite,
    /// Any other evaluation failure reported by the objective.
    #[error("objective evaluation failed: {0}")]
    Failed(String),
}

/// Failure of the backtracking line search.
#[derive(Debug, Clone, Error)]
pub enum LineSearchError {
    /// `g · d >= 0`: the supplied direction cannot decrease the objective.
    #[error("search direction is not a descent direction")]
    NotDescent,
    /// No trial step satisfied the sufficient-decrease condition.
    #[error("no step satisfying sufficient decrease within {trials} trials")]
    NoSufficientDecrease { trials: usize },
    /// The objective failed while evaluating a trial point.
    #[error(transparent)]
    Eval(#[from] EvalError),
}
