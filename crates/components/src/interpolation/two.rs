use ndarray::{Array1, Array2};
use ninterp::{
    prelude::{Interp2DOwned, Interpolator},
    strategy::enums::Strategy2DEnum,
};
use gaprop_core::Model;

use super::{error::InterpError, extrapolate::Extrapolate};

/// Interpolation strategies supported for two-dimensional interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy2D {
    /// Bilinear weighting of the four surrounding grid points.
    Linear,

    /// Value at the closest grid point.
    Nearest,
}

/// A tabulated function of two variables on a rectilinear grid.
#[derive(Debug, Clone)]
pub struct Interp2D(Interp2DOwned<f64, Strategy2DEnum>);

impl Interp2D {
    /// Creates a 2D interpolator from grid coordinates, values, strategy, and extrapolation behavior.
    ///
    /// # Arguments
    ///
    /// * `x` - grid coordinates along the first axis.
    /// * `y` - grid coordinates along the second axis.
    /// * `f_xy` - values with shape `(x.len(), y.len())`.
    /// * `strategy` - how values are estimated between grid points.
    /// * `extrapolate` - behavior outside the bounds of the grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the arrays have incompatible shapes or a grid is not sorted.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndarray::array;
    /// use gaprop_components::interpolation::{Interp2D, Strategy2D, Extrapolate};
    ///
    /// let interp = Interp2D::new(
    ///     array![0., 1., 2.],
    ///     array![0., 1., 2.],
    ///     array![
    ///         [0.0, 0.4, 0.8],
    ///         [0.2, 0.6, 1.0],
    ///         [0.4, 0.8, 1.2],
    ///     ],
    ///     Strategy2D::Linear,
    ///     Extrapolate::Clamp,
    /// ).unwrap();
    ///
    /// let value = interp.eval(1.5, 1.5).unwrap();
    /// assert!((value - 0.9).abs() < 1e-12);
    /// ```
    pub fn new(
        x: Array1<f64>,
        y: Array1<f64>,
        f_xy: Array2<f64>,
        strategy: Strategy2D,
        extrapolate: Extrapolate<f64>,
    ) -> Result<Self, InterpError> {
        let strategy: Strategy2DEnum = match strategy {
            Strategy2D::Linear => ninterp::strategy::Linear.into(),
            Strategy2D::Nearest => ninterp::strategy::Nearest.into(),
        };
        Ok(Self(Interp2DOwned::new(
            x,
            y,
            f_xy,
            strategy,
            extrapolate.into(),
        )?))
    }

    /// Evaluates the table at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the point is out of range and extrapolation is disabled.
    pub fn eval(&self, x: f64, y: f64) -> Result<f64, InterpError> {
        self.0.interpolate(&[x, y]).map_err(Into::into)
    }
}

impl Model for Interp2D {
    type Input = [f64; 2];
    type Output = f64;
    type Error = InterpError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.eval(input[0], input[1])
    }
}
