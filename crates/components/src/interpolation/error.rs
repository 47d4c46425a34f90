use ninterp::error::{InterpolateError, ValidateError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterpError {
    /// The grid or values were rejected at construction.
    #[error("invalid interpolation data: {0}")]
    Validation(#[from] ValidateError),
    /// A query failed, usually because it is outside the grid.
    #[error("interpolation failed: {0}")]
    Interpolation(#[from] InterpolateError),
}
