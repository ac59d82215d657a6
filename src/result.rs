use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vector::Vector;

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct SolveOutput<V: Vector> {
    /// Final iterate (the last valid point if the solve failed).
    pub x: V,
    /// Objective value at `x`.
    pub value: V::Scalar,
    /// Gradient at `x`.
    pub gradient: V,
    /// Norm of the gradient at `x`.
    pub gradient_norm: V::Scalar,
    /// Number of outer iterations performed.
    pub iterations: usize,
    /// Total number of objective evaluations (value/gradient and
    /// Hessian-vector products).
    pub func_evals: usize,
    /// How the solve ended.
    pub status: Status,
    /// Full iterate history, `Some` iff requested; the first entry is the
    /// initial guess and the last equals `x`.
    pub iterates: Option<Vec<V>>,
}

/// How a solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Gradient norm fell below the outer tolerance.
    Converged,
    /// Reached the outer iteration cap without converging. A defined
    /// terminal outcome, not an error.
    MaxIterationsReached,
    /// A fatal condition stopped the solve.
    Failed(FailureReason),
}

/// What stopped a failed solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    /// The objective's value/gradient/Hessian call failed.
    ObjectiveEvaluation,
    /// The line search found no step with sufficient decrease.
    LineSearch,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Converged => write!(f, "gradient norm below tolerance"),
            Status::MaxIterationsReached => write!(f, "maximum iterations reached"),
            Status::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::ObjectiveEvaluation => write!(f, "objective evaluation error"),
            FailureReason::LineSearch => write!(f, "line search found no acceptable step"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display() {
        assert_eq!(Status::Converged.to_string(), "gradient norm below tolerance");
        assert_eq!(
            Status::MaxIterationsReached.to_string(),
            "maximum iterations reached"
        );
        assert_eq!(
            Status::Failed(FailureReason::LineSearch).to_string(),
            "failed: line search found no acceptable step"
        );
    }
}
