use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::error::LineSearchError;
use crate::objective::Objective;
use crate::vector::Vector;

/// Parameters for the backtracking line search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSearchParams<F> {
    /// Sufficient decrease constant `c1` (default: 1e-4).
    pub c1: F,
    /// Optional curvature constant `c2`: when set, a trial step must also
    /// satisfy the Wolfe condition `g(x+αd)·d >= c2 (g·d)` (default: None).
    pub curvature: Option<F>,
    /// Contraction factor applied to the step on rejection (default: 0.5).
    pub contraction: F,
    /// Maximum number of trial steps before declaring failure (default: 40).
    pub max_trials: usize,
    /// Initial trial step (default: 1.0).
    pub alpha_init: F,
}

impl Default for LineSearchParams<f64> {
    fn default() -> Self {
        LineSearchParams {
            c1: 1e-4,
            curvature: None,
            contraction: 0.5,
            max_trials: 40,
            alpha_init: 1.0,
        }
    }
}

impl Default for LineSearchParams<f32> {
    fn default() -> Self {
        LineSearchParams {
            c1: 1e-4,
            curvature: None,
            contraction: 0.5,
            max_trials: 25,
            alpha_init: 1.0,
        }
    }
}

/// Result of a successful line search.
#[derive(Debug, Clone)]
pub struct LineSearchResult<V: Vector> {
    /// The accepted step size.
    pub alpha: V::Scalar,
    /// Objective value at `x + alpha * d`.
    pub value: V::Scalar,
    /// Gradient at `x + alpha * d`.
    pub gradient: V,
    /// Number of objective evaluations used.
    pub evals: usize,
}

/// Backtracking line search satisfying the Armijo (sufficient decrease)
/// condition `f(x + αd) <= f(x) + c1 α (g·d)`, and optionally the Wolfe
/// curvature condition when [`LineSearchParams::curvature`] is set.
///
/// Starts at `alpha_init` and multiplies by `contraction` on each rejection,
/// for at most `max_trials` trials. The accepted trial's value and gradient
/// are returned so the caller does not re-evaluate the objective.
///
/// A non-descent direction (`g·d >= 0`) fails immediately regardless of the
/// trial budget.
pub fn backtracking<V, O>(
    obj: &mut O,
    x: &V,
    d: &V,
    f_x: V::Scalar,
    grad_x: &V,
    params: &LineSearchParams<V::Scalar>,
) -> Result<LineSearchResult<V>, LineSearchError>
where
    V: Vector,
    O: Objective<V>,
{
    let dg = grad_x.dot(d);
    if dg >= V::Scalar::zero() {
        return Err(LineSearchError::NotDescent);
    }

    let mut alpha = params.alpha_init;
    let mut evals = 0;

    for _ in 0..params.max_trials {
        let mut x_new = x.clone();
        x_new.axpy(alpha, d);

        let (f_new, g_new) = obj.eval_grad(&x_new)?;
        evals += 1;

        let sufficient_decrease = f_new <= f_x + params.c1 * alpha * dg;
        let curvature_ok = match params.curvature {
            Some(c2) => g_new.dot(d) >= c2 * dg,
            None => true,
        };

        if sufficient_decrease && curvature_ok {
            return Ok(LineSearchResult {
                alpha,
                value: f_new,
                gradient: g_new,
                evals,
            });
        }

        alpha = alpha * params.contraction;
    }

    Err(LineSearchError::NoSufficientDecrease {
        trials: params.max_trials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;

    /// f(x) = 0.5 * (x0^2 + x1^2)
    struct Quadratic;

    impl Objective<Vec<f64>> for Quadratic {
        fn value(&mut self, x: &Vec<f64>) -> Result<f64, EvalError> {
            Ok(0.5 * (x[0] * x[0] + x[1] * x[1]))
        }

        fn eval_grad(&mut self, x: &Vec<f64>) -> Result<(f64, Vec<f64>), EvalError> {
            Ok((0.5 * (x[0] * x[0] + x[1] * x[1]), vec![x[0], x[1]]))
        }

        fn hess_vec(&mut self, _x: &Vec<f64>, v: &Vec<f64>) -> Result<Vec<f64>, EvalError> {
            Ok(v.clone())
        }
    }

    #[test]
    fn full_step_accepted_on_quadratic() {
        let mut obj = Quadratic;
        let x = vec![2.0, 3.0];
        let (f_x, grad) = obj.eval_grad(&x).unwrap();
        let d: Vec<f64> = grad.iter().map(|&g| -g).collect();

        let result =
            backtracking(&mut obj, &x, &d, f_x, &grad, &LineSearchParams::default()).unwrap();

        assert!(
            (result.alpha - 1.0).abs() < 1e-12,
            "full step should be accepted on quadratic, got alpha={}",
            result.alpha
        );
        assert!(result.value < f_x);
    }

    #[test]
    fn non_descent_direction_fails_regardless_of_budget() {
        let mut obj = Quadratic;
        let x = vec![2.0, 3.0];
        let (f_x, grad) = obj.eval_grad(&x).unwrap();
        let d = grad.clone(); // ascent direction

        for max_trials in [1, 10, 1000] {
            let params = LineSearchParams {
                max_trials,
                ..Default::default()
            };
            let result = backtracking(&mut obj, &x, &d, f_x, &grad, &params);
            assert!(matches!(result, Err(LineSearchError::NotDescent)));
        }
    }

    #[test]
    fn trial_budget_exhaustion_fails() {
        // Constant value with a nonzero reported gradient: Armijo can never hold
        struct Flat;
        impl Objective<Vec<f64>> for Flat {
            fn value(&mut self, _x: &Vec<f64>) -> Result<f64, EvalError> {
                Ok(1.0)
            }
            fn eval_grad(&mut self, _x: &Vec<f64>) -> Result<(f64, Vec<f64>), EvalError> {
                Ok((1.0, vec![1.0, 1.0]))
            }
            fn hess_vec(&mut self, _x: &Vec<f64>, v: &Vec<f64>) -> Result<Vec<f64>, EvalError> {
                Ok(v.clone())
            }
        }

        let mut obj = Flat;
        let x = vec![0.0, 0.0];
        let (f_x, grad) = obj.eval_grad(&x).unwrap();
        let d = vec![-1.0, -1.0];

        let params = LineSearchParams {
            max_trials: 5,
            ..Default::default()
        };
        let result = backtracking(&mut obj, &x, &d, f_x, &grad, &params);
        assert!(matches!(
            result,
            Err(LineSearchError::NoSufficientDecrease { trials: 5 })
        ));
    }

    #[test]
    fn curvature_condition_enforced() {
        let mut obj = Quadratic;
        let x = vec![2.0, 3.0];
        let (f_x, grad) = obj.eval_grad(&x).unwrap();
        let d: Vec<f64> = grad.iter().map(|&g| -g).collect();

        let params = LineSearchParams {
            curvature: Some(0.9),
            ..Default::default()
        };
        let result = backtracking(&mut obj, &x, &d, f_x, &grad, &params).unwrap();

        // Wolfe: g(x+αd)·d >= c2 * g·d
        let mut x_new = x.clone();
        x_new.axpy(result.alpha, &d);
        let (_, g_new) = obj.eval_grad(&x_new).unwrap();
        assert!(g_new.dot(&d) >= 0.9 * grad.dot(&d));
    }

    #[test]
    fn eval_error_propagates() {
        struct Failing;
        impl Objective<Vec<f64>> for Failing {
            fn value(&mut self, _x: &Vec<f64>) -> Result<f64, EvalError> {
                Err(EvalError::NonFinite)
            }
            fn eval_grad(&mut self, _x: &Vec<f64>) -> Result<(f64, Vec<f64>), EvalError> {
                Err(EvalError::NonFinite)
            }
            fn hess_vec(&mut self, _x: &Vec<f64>, v: &Vec<f64>) -> Result<Vec<f64>, EvalError> {
                Ok(v.clone())
            }
        }

        let mut obj = Failing;
        let x = vec![1.0];
        let grad = vec![1.0];
        let d = vec![-1.0];

        let result = backtracking(&mut obj, &x, &d, 1.0, &grad, &LineSearchParams::default());
        assert!(matches!(result, Err(LineSearchError::Eval(_))));
    }
}
