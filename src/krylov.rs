use num_traits::{Float, One, Zero};
use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use crate::objective::Objective;
use crate::vector::Vector;

/// The incrementally tracked residual is recomputed from scratch this often
/// to bound floating-point drift.
const RESIDUAL_REFRESH_INTERVAL: usize = 50;

/// Parameters for the inner conjugate-gradient solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KrylovParams<F> {
    /// Relative residual tolerance: stop when `||r|| <= rel_tol * ||g||`
    /// (default: 1e-2).
    pub rel_tol: F,
    /// Maximum CG iterations. If 0, defaults to `2 * dim` (default: 0).
    pub max_iter: usize,
}

impl Default for KrylovParams<f64> {
    fn default() -> Self {
        KrylovParams {
            rel_tol: 1e-2,
            max_iter: 0,
        }
    }
}

impl Default for KrylovParams<f32> {
    fn default() -> Self {
        KrylovParams {
            rel_tol: 1e-2,
            max_iter: 0,
        }
    }
}

/// How the inner solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KrylovStatus {
    /// Residual reached the relative tolerance.
    Converged,
    /// Iteration budget exhausted; the best iterate found is returned.
    MaxIterations,
    /// A direction of non-positive curvature was detected; the returned
    /// direction is still a descent direction.
    NegativeCurvature,
}

/// Outcome of one inner solve.
#[derive(Debug, Clone)]
pub struct KrylovSolve<V> {
    /// Approximate solution of `H s = -g`.
    pub direction: V,
    pub status: KrylovStatus,
    /// CG iterations performed.
    pub iterations: usize,
    /// Hessian-vector products consumed.
    pub hess_evals: usize,
}

/// Approximately solve the Newton system `H(x) s = -g` with unpreconditioned
/// conjugate gradients, using only Hessian-vector products.
///
/// Truncation (budget exhaustion or non-positive curvature) is not an error:
/// the best direction found so far is returned and the caller decides what
/// to do with it. When non-positive curvature is hit on the very first
/// iteration there is no partial iterate yet, so the steepest-descent
/// direction `-g` is returned instead.
///
/// Only [`Objective::hess_vec`] failures propagate as errors.
pub fn solve_newton_system<V, O>(
    obj: &mut O,
    x: &V,
    grad: &V,
    params: &KrylovParams<V::Scalar>,
) -> Result<KrylovSolve<V>, EvalError>
where
    V: Vector,
    O: Objective<V>,
{
    let one = V::Scalar::one();
    let max_iter = if params.max_iter == 0 {
        2 * x.dim()
    } else {
        params.max_iter
    };
    let tol = params.rel_tol * grad.norm();

    // s = 0, r = -g - H s = -g, d = r
    let mut s = grad.zero_like();
    let mut r = grad.scaled(-one);
    let mut d = r.clone();
    let mut r_dot_r = r.dot(&r);
    let mut hess_evals = 0usize;

    if r_dot_r.sqrt() <= tol {
        return Ok(KrylovSolve {
            direction: s,
            status: KrylovStatus::Converged,
            iterations: 0,
            hess_evals,
        });
    }

    for k in 0..max_iter {
        let hd = obj.hess_vec(x, &d)?;
        hess_evals += 1;
        let d_hd = d.dot(&hd);

        if d_hd <= V::Scalar::zero() {
            let direction = if k == 0 {
                // No partial iterate yet: fall back to steepest descent
                grad.scaled(-one)
            } else {
                s
            };
            return Ok(KrylovSolve {
                direction,
                status: KrylovStatus::NegativeCurvature,
                iterations: k + 1,
                hess_evals,
            });
        }

        let alpha = r_dot_r / d_hd;
        s.axpy(alpha, &d);

        if (k + 1) % RESIDUAL_REFRESH_INTERVAL == 0 {
            // r = -g - H s, from scratch
            let hs = obj.hess_vec(x, &s)?;
            hess_evals += 1;
            r = grad.scaled(-one);
            r.axpy(-one, &hs);
        } else {
            r.axpy(-alpha, &hd);
        }

        let r_dot_r_new = r.dot(&r);
        if r_dot_r_new.sqrt() <= tol {
            return Ok(KrylovSolve {
                direction: s,
                status: KrylovStatus::Converged,
                iterations: k + 1,
                hess_evals,
            });
        }

        let beta = r_dot_r_new / r_dot_r;
        r_dot_r = r_dot_r_new;

        // d = r + beta * d
        d.scale_mut(beta);
        d.axpy(one, &r);
    }

    Ok(KrylovSolve {
        direction: s,
        status: KrylovStatus::MaxIterations,
        iterations: max_iter,
        hess_evals,
    })
}
