use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::convergence::ConvergenceParams;
use crate::krylov::KrylovParams;
use crate::line_search::LineSearchParams;

/// Outer method family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Algorithm {
    #[default]
    LineSearch,
}

/// Inner direction method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DescentMethod {
    #[default]
    NewtonKrylov,
}

/// Immutable per-solve configuration.
///
/// Selected once at solve start; the driver never re-reads raw options
/// during iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveConfig<F> {
    pub algorithm: Algorithm,
    pub descent: DescentMethod,
    /// When true the output carries every iterate, initial guess first.
    pub return_iterates: bool,
    pub convergence: ConvergenceParams<F>,
    pub krylov: KrylovParams<F>,
    pub line_search: LineSearchParams<F>,
}

impl Default for SolveConfig<f64> {
    fn default() -> Self {
        SolveConfig {
            algorithm: Algorithm::default(),
            descent: DescentMethod::default(),
            return_iterates: false,
            convergence: ConvergenceParams::default(),
            krylov: KrylovParams::default(),
            line_search: LineSearchParams::default(),
        }
    }
}

impl Default for SolveConfig<f32> {
    fn default() -> Self {
        SolveConfig {
            algorithm: Algorithm::default(),
            descent: DescentMethod::default(),
            return_iterates: false,
            convergence: ConvergenceParams::default(),
            krylov: KrylovParams::default(),
            line_search: LineSearchParams::default(),
        }
    }
}

impl SolveConfig<f64> {
    /// Normalize a raw, nested option map into a typed configuration.
    ///
    /// Recognized keys (all optional; missing keys keep their defaults,
    /// unrecognized keys are ignored):
    ///
    /// ```json
    /// {
    ///   "Algorithm": "Line Search",
    ///   "Return Iterates": true,
    ///   "Status Test": {
    ///     "Gradient Tolerance": 1e-8,
    ///     "Iteration Limit": 100
    ///   },
    ///   "General": {
    ///     "Krylov": { "Relative Tolerance": 1e-2, "Iteration Limit": 0 }
    ///   },
    ///   "Step": {
    ///     "Line Search": {
    ///       "Sufficient Decrease Tolerance": 1e-4,
    ///       "Curvature Condition": 0.9,
    ///       "Backtracking Rate": 0.5,
    ///       "Function Evaluation Limit": 40,
    ///       "Initial Step Size": 1.0,
    ///       "Descent Method": { "Type": "Newton-Krylov" }
    ///     }
    ///   }
    /// }
    /// ```
    ///
    /// Booleans and numbers may also arrive as strings (`"true"`, `"1e-8"`),
    /// as loosely typed front ends tend to pass them.
    pub fn from_options(options: &Value) -> Self {
        let mut config = SolveConfig::default();

        if let Some(v) = options.get("Return Iterates").and_then(as_bool) {
            config.return_iterates = v;
        }

        if let Some(status) = options.get("Status Test") {
            if let Some(v) = status.get("Gradient Tolerance").and_then(as_f64) {
                config.convergence.grad_tol = v;
            }
            if let Some(v) = status.get("Iteration Limit").and_then(as_usize) {
                config.convergence.max_iter = v;
            }
        }

        if let Some(krylov) = options.get("General").and_then(|g| g.get("Krylov")) {
            if let Some(v) = krylov.get("Relative Tolerance").and_then(as_f64) {
                config.krylov.rel_tol = v;
            }
            if let Some(v) = krylov.get("Iteration Limit").and_then(as_usize) {
                config.krylov.max_iter = v;
            }
        }

        if let Some(ls) = options.get("Step").and_then(|s| s.get("Line Search")) {
            if let Some(v) = ls.get("Sufficient Decrease Tolerance").and_then(as_f64) {
                config.line_search.c1 = v;
            }
            if let Some(v) = ls.get("Curvature Condition").and_then(as_f64) {
                config.line_search.curvature = Some(v);
            }
            if let Some(v) = ls.get("Backtracking Rate").and_then(as_f64) {
                config.line_search.contraction = v;
            }
            if let Some(v) = ls.get("Function Evaluation Limit").and_then(as_usize) {
                config.line_search.max_trials = v;
            }
            if let Some(v) = ls.get("Initial Step Size").and_then(as_f64) {
                config.line_search.alpha_init = v;
            }
        }

        // "Algorithm" and "Step"/"Line Search"/"Descent Method"/"Type" name
        // the only supported family and method; other spellings are ignored
        // rather than rejected, keeping the map forward-compatible.
        config
    }
}

fn as_bool(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn as_usize(v: &Value) -> Option<usize> {
    match v {
        Value::Number(n) => n.as_u64().map(|u| u as usize),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
