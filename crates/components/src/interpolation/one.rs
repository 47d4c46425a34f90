use ndarray::Array1;
use ninterp::{
    prelude::{Interp1DOwned, Interpolator},
    strategy::enums::Strategy1DEnum,
};
use gaprop_core::Model;

use super::{error::InterpError, extrapolate::Extrapolate};

/// Interpolation strategies supported along a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy1D {
    Linear,
    Nearest,
}

/// A tabulated function of one variable.
#[derive(Debug, Clone)]
pub struct Interp1D {
    inner: Interp1DOwned<f64, Strategy1DEnum>,
    range: [f64; 2],
}

impl Interp1D {
    /// Creates an interpolator over the grid `x` with values `f_x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty, not sorted, or does not match
    /// the length of `f_x`.
    pub fn new(
        x: Array1<f64>,
        f_x: Array1<f64>,
        strategy: Strategy1D,
        extrapolate: Extrapolate<f64>,
    ) -> Result<Self, InterpError> {
        let range = [
            x.first().copied().unwrap_or(f64::NAN),
            x.last().copied().unwrap_or(f64::NAN),
        ];
        let strategy: Strategy1DEnum = match strategy {
            Strategy1D::Linear => ninterp::strategy::Linear.into(),
            Strategy1D::Nearest => ninterp::strategy::Nearest.into(),
        };
        let inner = Interp1DOwned::new(x, f_x, strategy, extrapolate.into())?;
        Ok(Self { inner, range })
    }

    /// Returns the first and last grid coordinates.
    #[must_use]
    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Evaluates the table at `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` is out of range and extrapolation is disabled.
    pub fn eval(&self, x: f64) -> Result<f64, InterpError> {
        self.inner.interpolate(&[x]).map_err(Into::into)
    }
}

impl Model for Interp1D {
    type Input = f64;
    type Output = f64;
    type Error = InterpError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.eval(*input)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn strategy_interp_matches_expected_value() {
        let test_cases = [(Strategy1D::Linear, 0.56), (Strategy1D::Nearest, 0.4)];

        for (strategy, expected) in test_cases {
            let interp = Interp1D::new(
                array![0., 1., 2.],
                array![0.0, 0.4, 0.8],
                strategy,
                Extrapolate::Error,
            )
            .unwrap();

            let actual = interp.call(&1.4).unwrap();
            assert!(
                approx::relative_eq!(actual, expected),
                "strategy {strategy:?} produced wrong result: got {actual}, expected {expected}"
            );
        }
    }

    #[test]
    fn clamp_holds_end_values() {
        let interp = Interp1D::new(
            array![10., 20., 30.],
            array![5.0, 7.0, 6.0],
            Strategy1D::Linear,
            Extrapolate::Clamp,
        )
        .unwrap();

        assert_relative_eq!(interp.eval(-4.0).unwrap(), 5.0);
        assert_relative_eq!(interp.eval(99.0).unwrap(), 6.0);
        assert_eq!(interp.range(), [10.0, 30.0]);
    }

    #[test]
    fn error_extrapolation_rejects_out_of_range() {
        let interp = Interp1D::new(
            array![0., 1.],
            array![0.0, 1.0],
            Strategy1D::Linear,
            Extrapolate::Error,
        )
        .unwrap();

        assert!(matches!(
            interp.eval(1.5),
            Err(InterpError::Interpolation(_))
        ));
    }

    #[test]
    fn mismatched_lengths_fail_validation() {
        let result = Interp1D::new(
            array![0., 1., 2.],
            array![0.0, 1.0],
            Strategy1D::Linear,
            Extrapolate::Clamp,
        );

        assert!(matches!(result, Err(InterpError::Validation(_))));
    }
}
