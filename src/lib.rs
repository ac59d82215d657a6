//! nkopt: unconstrained nonlinear optimization with a line-search
//! Newton-Krylov driver.
//!
//! - [`Vector`]: the operations the solver needs on decision-variable
//!   vectors (implemented for `Vec<F>`)
//! - [`Objective`]: value / gradient / Hessian-vector-product interface
//! - [`solve_newton_system`]: truncated-CG solve of the Newton system
//! - [`backtracking`]: Armijo (optionally Wolfe) line search
//! - [`solve_unconstrained`]: the outer driver
//!
//! The search direction comes from an inexact Krylov solve of
//! `H(x) s = -∇f(x)`; no explicit Hessian is ever formed, only
//! Hessian-vector products. Every step is validated by the line search
//! before the iterate moves.
//!
//! ```
//! use nkopt::{solve_unconstrained, EvalError, Objective, SolveConfig, Status};
//!
//! /// f(x) = ||x||^2
//! struct Sphere;
//!
//! impl Objective<Vec<f64>> for Sphere {
//!     fn value(&mut self, x: &Vec<f64>) -> Result<f64, EvalError> {
//!         Ok(x.iter().map(|&xi| xi * xi).sum())
//!     }
//!     fn eval_grad(&mut self, x: &Vec<f64>) -> Result<(f64, Vec<f64>), EvalError> {
//!         let f = x.iter().map(|&xi| xi * xi).sum();
//!         let g = x.iter().map(|&xi| 2.0 * xi).collect();
//!         Ok((f, g))
//!     }
//!     fn hess_vec(&mut self, _x: &Vec<f64>, v: &Vec<f64>) -> Result<Vec<f64>, EvalError> {
//!         Ok(v.iter().map(|&vi| 2.0 * vi).collect())
//!     }
//! }
//!
//! let result = solve_unconstrained(&mut Sphere, &vec![1.0, 1.0], &SolveConfig::default());
//! assert_eq!(result.status, Status::Converged);
//! assert!(result.x.iter().all(|&xi| xi.abs() < 1e-6));
//! ```

pub mod config;
pub mod convergence;
pub mod error;
pub mod krylov;
pub mod line_search;
pub mod objective;
pub mod result;
pub mod solvers;
pub mod vector;

pub use config::{Algorithm, DescentMethod, SolveConfig};
pub use convergence::ConvergenceParams;
pub use error::{EvalError, LineSearchError};
pub use krylov::{solve_newton_system, KrylovParams, KrylovSolve, KrylovStatus};
pub use line_search::{backtracking, LineSearchParams, LineSearchResult};
pub use objective::{FnObjective, Objective};
pub use result::{FailureReason, SolveOutput, Status};
pub use solvers::newton_krylov::solve_unconstrained;
pub use vector::Vector;
