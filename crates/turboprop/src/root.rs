//! Scalar root finding on closures, backed by the bisection solver.

use std::convert::Infallible;

use gaprop_core::{EquationProblem, Model};
use gaprop_solvers::equation::bisection::{self, Action, Config, Event};

use crate::EngineError;

/// Solver settings shared by every solve in the engine model.
pub(crate) const CONFIG: Config = Config {
    max_iters: 200,
    x_abs_tol: 1e-9,
    x_rel_tol: 1e-12,
    residual_tol: 1e-9,
};

/// A residual function viewed as a model.
struct Residual<F>(F);

impl<F, E> Model for Residual<F>
where
    F: Fn(f64) -> Result<f64, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Input = f64;
    type Output = f64;
    type Error = E;

    fn call(&self, input: &f64) -> Result<f64, E> {
        (self.0)(*input)
    }
}

/// Drives the model output to zero.
struct Zero;

impl EquationProblem<1> for Zero {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Infallible> {
        Ok(x[0])
    }

    fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Infallible> {
        Ok([*output])
    }
}

/// Finds `x` in `bracket` with `f(x) = 0`. Failed evaluations are errors.
pub(crate) fn solve<F, E>(quantity: &'static str, bracket: [f64; 2], f: F) -> Result<f64, EngineError>
where
    F: Fn(f64) -> Result<f64, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    bisection::solve_unobserved(&Residual(f), &Zero, bracket, &CONFIG)
        .map(|solution| solution.x)
        .map_err(EngineError::solver(quantity))
}

/// Finds `x` in `bracket` with `f(x) = 0`, treating failed evaluations as
/// lying on the negative side of the root.
pub(crate) fn solve_failures_negative<F, E>(
    quantity: &'static str,
    bracket: [f64; 2],
    f: F,
) -> Result<f64, EngineError>
where
    F: Fn(f64) -> Result<f64, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    let observer = |event: &Event<'_, Residual<F>, Zero>| {
        event.result().as_ref().err().map(|_| Action::assume_negative())
    };

    bisection::solve(&Residual(f), &Zero, bracket, &CONFIG, observer)
        .map(|solution| solution.x)
        .map_err(EngineError::solver(quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[derive(Debug, thiserror::Error)]
    #[error("undefined")]
    struct Undefined;

    #[test]
    fn solves_a_cubic() {
        let x = solve("x", [0.0, 3.0], |x| Ok::<_, Infallible>(x * x * x - 8.0)).unwrap();
        assert_relative_eq!(x, 2.0, epsilon = 1e-8);
    }

    #[test]
    fn failures_can_be_assumed_negative() {
        let f = |x: f64| if x < 1.0 { Err(Undefined) } else { Ok(x - 2.0) };

        assert!(matches!(
            solve("x", [0.0, 5.0], f),
            Err(EngineError::Solver { quantity: "x", .. })
        ));
        let x = solve_failures_negative("x", [0.0, 5.0], f).unwrap();
        assert_relative_eq!(x, 2.0, epsilon = 1e-8);
    }
}
