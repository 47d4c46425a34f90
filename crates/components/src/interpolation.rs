//! Gridded interpolation.
//!
//! Thin wrappers around `ninterp` owned interpolators that expose a
//! [`Model`](gaprop_core::Model) interface and a shared error type.

mod error;
mod extrapolate;
mod one;
mod two;

pub use error::InterpError;
pub use extrapolate::Extrapolate;
pub use one::{Interp1D, Strategy1D};
pub use two::{Interp2D, Strategy2D};
