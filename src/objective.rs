use num_traits::Float;

use crate::error::EvalError;
use crate::vector::Vector;

/// Trait for optimization objectives.
///
/// Implementors provide function, gradient, and Hessian-vector-product
/// evaluation. Methods take `&mut self` to allow caching, eval counting,
/// and internal buffers. The point `x` is never mutated.
///
/// Gradient and Hessian action must be consistent (the Hessian is the
/// Jacobian of the gradient); the solver relies on this for Newton
/// convergence but does not verify it.
pub trait Objective<V: Vector> {
    /// Objective value `f(x)`.
    fn value(&mut self, x: &V) -> Result<V::Scalar, EvalError>;

    /// Evaluate the objective and its gradient at `x`.
    ///
    /// Returns `(f(x), ∇f(x))`.
    fn eval_grad(&mut self, x: &V) -> Result<(V::Scalar, V), EvalError>;

    /// Hessian-vector product `H(x) · v`.
    fn hess_vec(&mut self, x: &V, v: &V) -> Result<V, EvalError>;
}

/// Adapter wrapping closures as an [`Objective`] over `Vec<F>`.
///
/// `value_grad` returns `(f(x), ∇f(x))`; `hess` returns `H(x) · v`.
/// Counts evaluations of both closures.
pub struct FnObjective<FG, H> {
    value_grad: FG,
    hess: H,
    func_evals: usize,
}

impl<FG, H> FnObjective<FG, H> {
    pub fn new(value_grad: FG, hess: H) -> Self {
        FnObjective {
            value_grad,
            hess,
            func_evals: 0,
        }
    }

    /// Number of closure evaluations performed so far.
    pub fn func_evals(&self) -> usize {
        self.func_evals
    }
}

impl<F, FG, H> Objective<Vec<F>> for FnObjective<FG, H>
where
    F: Float + std::fmt::Debug + std::fmt::Display,
    FG: FnMut(&[F]) -> Result<(F, Vec<F>), EvalError>,
    H: FnMut(&[F], &[F]) -> Result<Vec<F>, EvalError>,
{
    fn value(&mut self, x: &Vec<F>) -> Result<F, EvalError> {
        self.func_evals += 1;
        Ok((self.value_grad)(x)?.0)
    }

    fn eval_grad(&mut self, x: &Vec<F>) -> Result<(F, Vec<F>), EvalError> {
        self.func_evals += 1;
        (self.value_grad)(x)
    }

    fn hess_vec(&mut self, x: &Vec<F>, v: &Vec<F>) -> Result<Vec<F>, EvalError> {
        self.func_evals += 1;
        (self.hess)(x, v)
    }
}
