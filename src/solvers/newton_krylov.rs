use log::{debug, warn};
use num_traits::Float;

use crate::config::SolveConfig;
use crate::error::LineSearchError;
use crate::krylov::{solve_newton_system, KrylovStatus};
use crate::line_search::backtracking;
use crate::objective::Objective;
use crate::result::{FailureReason, SolveOutput, Status};
use crate::vector::Vector;

/// Consecutive truncated inner solves before the diagnostic escalates to a
/// warning. Truncation is never fatal either way.
const KRYLOV_WARN_STREAK: usize = 5;

/// Line-search Newton-Krylov minimization.
///
/// Minimizes `obj` starting from `x0`. Each outer iteration computes a
/// Newton direction by approximately solving `H s = -g` with conjugate
/// gradients (Hessian-vector products only), selects a step length by
/// backtracking line search, and updates the iterate. A step is accepted
/// only if the line search accepts it.
///
/// Terminal outcomes:
/// - [`Status::Converged`] once `||g|| <= grad_tol` (checked at the initial
///   guess too: a stationary start returns with zero iterations);
/// - [`Status::MaxIterationsReached`] at the iteration cap, including
///   `max_iter == 0` with the initial guess unchanged;
/// - [`Status::Failed`] on an objective evaluation error or a line search
///   that finds no acceptable step; the last valid iterate is returned.
///
/// Inner-solve truncation (budget or non-positive curvature) is only a
/// diagnostic: the driver proceeds with the fallback direction.
pub fn solve_unconstrained<V, O>(
    obj: &mut O,
    x0: &V,
    config: &SolveConfig<V::Scalar>,
) -> SolveOutput<V>
where
    V: Vector,
    O: Objective<V>,
{
    let mut history = if config.return_iterates {
        Some(vec![x0.clone()])
    } else {
        None
    };

    let (mut f_val, mut grad) = match obj.eval_grad(x0) {
        Ok(pair) => pair,
        Err(err) => {
            debug!("initial evaluation failed: {err}");
            return SolveOutput {
                x: x0.clone(),
                value: V::Scalar::nan(),
                gradient: x0.zero_like(),
                gradient_norm: V::Scalar::nan(),
                iterations: 0,
                func_evals: 1,
                status: Status::Failed(FailureReason::ObjectiveEvaluation),
                iterates: history,
            };
        }
    };
    let mut func_evals = 1usize;
    let mut grad_norm = grad.norm();

    debug!(
        "solve start: {:?} / {:?}, ||g0|| = {}, grad_tol = {}, max_iter = {}",
        config.algorithm,
        config.descent,
        grad_norm,
        config.convergence.grad_tol,
        config.convergence.max_iter
    );

    if grad_norm <= config.convergence.grad_tol {
        return SolveOutput {
            x: x0.clone(),
            value: f_val,
            gradient: grad,
            gradient_norm: grad_norm,
            iterations: 0,
            func_evals,
            status: Status::Converged,
            iterates: history,
        };
    }

    if config.convergence.max_iter == 0 {
        // The cap forbids any update; a defined outcome, not an error
        return SolveOutput {
            x: x0.clone(),
            value: f_val,
            gradient: grad,
            gradient_norm: grad_norm,
            iterations: 0,
            func_evals,
            status: Status::MaxIterationsReached,
            iterates: history,
        };
    }

    let mut x = x0.clone();
    let mut truncated_streak = 0usize;

    for iter in 0..config.convergence.max_iter {
        let krylov = match solve_newton_system(obj, &x, &grad, &config.krylov) {
            Ok(solve) => solve,
            Err(err) => {
                debug!("Hessian-vector product failed at iteration {}: {err}", iter + 1);
                return SolveOutput {
                    x,
                    value: f_val,
                    gradient: grad,
                    gradient_norm: grad_norm,
                    iterations: iter,
                    func_evals,
                    status: Status::Failed(FailureReason::ObjectiveEvaluation),
                    iterates: history,
                };
            }
        };
        func_evals += krylov.hess_evals;

        match krylov.status {
            KrylovStatus::Converged => truncated_streak = 0,
            status => {
                truncated_streak += 1;
                debug!(
                    "inner solve stopped early ({status:?}) after {} iterations",
                    krylov.iterations
                );
                if truncated_streak == KRYLOV_WARN_STREAK {
                    warn!(
                        "{truncated_streak} consecutive truncated inner solves; \
                         Newton directions may be poor"
                    );
                }
            }
        }

        let ls = match backtracking(
            obj,
            &x,
            &krylov.direction,
            f_val,
            &grad,
            &config.line_search,
        ) {
            Ok(ls) => ls,
            Err(LineSearchError::Eval(err)) => {
                debug!("evaluation failed during line search: {err}");
                return SolveOutput {
                    x,
                    value: f_val,
                    gradient: grad,
                    gradient_norm: grad_norm,
                    iterations: iter,
                    func_evals,
                    status: Status::Failed(FailureReason::ObjectiveEvaluation),
                    iterates: history,
                };
            }
            Err(err) => {
                debug!("line search failed: {err}");
                return SolveOutput {
                    x,
                    value: f_val,
                    gradient: grad,
                    gradient_norm: grad_norm,
                    iterations: iter,
                    func_evals,
                    status: Status::Failed(FailureReason::LineSearch),
                    iterates: history,
                };
            }
        };
        func_evals += ls.evals;

        // x <- x + alpha * s; the line search already evaluated f and g there
        x.axpy(ls.alpha, &krylov.direction);
        f_val = ls.value;
        grad = ls.gradient;
        grad_norm = grad.norm();

        if let Some(iterates) = history.as_mut() {
            iterates.push(x.clone());
        }

        debug!(
            "iter {}: f = {}, ||g|| = {}, step = {}",
            iter + 1,
            f_val,
            grad_norm,
            ls.alpha
        );

        if grad_norm <= config.convergence.grad_tol {
            return SolveOutput {
                x,
                value: f_val,
                gradient: grad,
                gradient_norm: grad_norm,
                iterations: iter + 1,
                func_evals,
                status: Status::Converged,
                iterates: history,
            };
        }
    }

    SolveOutput {
        x,
        value: f_val,
        gradient: grad,
        gradient_norm: grad_norm,
        iterations: config.convergence.max_iter,
        func_evals,
        status: Status::MaxIterationsReached,
        iterates: history,
    }
}
