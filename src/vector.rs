use std::fmt::{Debug, Display};

use num_traits::{Float, One};

/// Operations the solver needs on decision-variable vectors.
///
/// The driver never assumes a concrete representation; any type providing
/// these operations over a floating-point scalar works. All operations are
/// pure with respect to their inputs except the in-place variants, which
/// document the argument they mutate. Dimension mismatch is a precondition
/// violation and fails fast in debug builds.
pub trait Vector: Clone {
    type Scalar: Float + Debug + Display;

    /// Number of components.
    fn dim(&self) -> usize;

    /// A zero vector of the same dimension as `self`.
    fn zero_like(&self) -> Self;

    /// Inner product `self · other`.
    fn dot(&self, other: &Self) -> Self::Scalar;

    /// Euclidean norm, derived from [`dot`](Vector::dot).
    fn norm(&self) -> Self::Scalar {
        self.dot(self).sqrt()
    }

    /// In-place scaling: mutates `self` to `alpha * self`.
    fn scale_mut(&mut self, alpha: Self::Scalar);

    /// In-place update: mutates `self` to `self + alpha * v`.
    fn axpy(&mut self, alpha: Self::Scalar, v: &Self);

    /// `self + v`, allocating.
    fn add(&self, v: &Self) -> Self {
        let mut out = self.clone();
        out.axpy(Self::Scalar::one(), v);
        out
    }

    /// `alpha * self`, allocating.
    fn scaled(&self, alpha: Self::Scalar) -> Self {
        let mut out = self.clone();
        out.scale_mut(alpha);
        out
    }
}

/// The Euclidean R^n case.
impl<F: Float + Debug + Display> Vector for Vec<F> {
    type Scalar = F;

    fn dim(&self) -> usize {
        self.len()
    }

    fn zero_like(&self) -> Self {
        vec![F::zero(); self.len()]
    }

    fn dot(&self, other: &Self) -> F {
        debug_assert_eq!(self.len(), other.len());
        let mut s = F::zero();
        for i in 0..self.len() {
            s = s + self[i] * other[i];
        }
        s
    }

    fn scale_mut(&mut self, alpha: F) {
        for v in self.iter_mut() {
            *v = *v * alpha;
        }
    }

    fn axpy(&mut self, alpha: F, v: &Self) {
        debug_assert_eq!(self.len(), v.len());
        for i in 0..self.len() {
            self[i] = self[i] + alpha * v[i];
        }
    }
}
