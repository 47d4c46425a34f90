use thiserror::Error;

use gaprop_core::{EquationProblem, Model, Snapshot};

/// A model call made at solver variables `x`, with the residuals it produced.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O, const N: usize> {
    pub x: [f64; N],
    pub residuals: [f64; N],
    pub snapshot: Snapshot<I, O>,
}

impl<I, O, const N: usize> Evaluation<I, O, N> {
    /// Largest residual magnitude.
    #[must_use]
    pub fn max_abs_residual(&self) -> f64 {
        self.residuals.iter().fold(0.0, |acc, r| acc.max(r.abs()))
    }
}

/// The stage of an evaluation that failed.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    #[error("could not map x to a model input")]
    Input(#[source] PE),
    #[error("model call failed")]
    Model(#[source] ME),
    #[error("could not compute residuals")]
    Residuals(#[source] PE),
}

pub type EvaluateResult<M, P, const N: usize> = Result<
    Evaluation<<M as Model>::Input, <M as Model>::Output, N>,
    EvalError<<M as Model>::Error, <P as EquationProblem<N>>::Error>,
>;

/// Maps `x` to a model input, calls the model and computes the residuals.
///
/// # Errors
///
/// Returns the [`EvalError`] of the first stage that fails.
pub fn evaluate<M, P, const N: usize>(model: &M, problem: &P, x: [f64; N]) -> EvaluateResult<M, P, N>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    let input = problem.input(&x).map_err(EvalError::Input)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let residuals = problem.residuals(&input, &output).map_err(EvalError::Residuals)?;

    Ok(Evaluation {
        x,
        residuals,
        snapshot: Snapshot::new(input, output),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    struct Cube;
    impl Model for Cube {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, input: &f64) -> Result<f64, Infallible> {
            Ok(input.powi(3))
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("x out of range")]
    struct OutOfRange;

    /// Accepts only non-negative `x` and targets an output of 8.
    struct Target;
    impl EquationProblem<1> for Target {
        type Input = f64;
        type Output = f64;
        type Error = OutOfRange;

        fn input(&self, x: &[f64; 1]) -> Result<f64, OutOfRange> {
            if x[0] < 0.0 { Err(OutOfRange) } else { Ok(x[0]) }
        }

        fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], OutOfRange> {
            Ok([output - 8.0])
        }
    }

    #[test]
    fn residuals_and_snapshot() {
        let eval = evaluate(&Cube, &Target, [3.0]).unwrap();
        assert_relative_eq!(eval.residuals[0], 19.0);
        assert_relative_eq!(eval.snapshot.output, 27.0);
        assert_relative_eq!(eval.max_abs_residual(), 19.0);
    }

    #[test]
    fn input_failure_is_reported_as_such() {
        assert!(matches!(evaluate(&Cube, &Target, [-1.0]), Err(EvalError::Input(OutOfRange))));
    }
}
