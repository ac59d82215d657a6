use serde::{Deserialize, Serialize};

/// Parameters controlling outer-loop termination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvergenceParams<F> {
    /// Maximum number of outer iterations (default: 100).
    pub max_iter: usize,
    /// Gradient norm tolerance: stop when `||g|| <= grad_tol` (default: 1e-8).
    pub grad_tol: F,
}

impl Default for ConvergenceParams<f64> {
    fn default() -> Self {
        ConvergenceParams {
            max_iter: 100,
            grad_tol: 1e-8,
        }
    }
}

impl Default for ConvergenceParams<f32> {
    fn default() -> Self {
        ConvergenceParams {
            max_iter: 100,
            grad_tol: 1e-5,
        }
    }
}
