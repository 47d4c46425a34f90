//! Numeric invariants checked once, when a value is built.
//!
//! A [`Constrained<T, C>`] can only hold a value that passed the check of its
//! marker `C`:
//!
//! - [`StrictlyPositive`]: greater than zero
//! - [`UnitInterval`]: within `[0, 1]`

mod strictly_positive;
mod unit_interval;

use std::marker::PhantomData;

use thiserror::Error;

pub use strictly_positive::StrictlyPositive;
pub use unit_interval::UnitInterval;

/// A marker type that accepts or rejects values of `T`.
pub trait Constraint<T> {
    /// # Errors
    ///
    /// Returns the [`ConstraintError`] describing how `value` fails.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// How a value failed its [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A value known to satisfy `C`.
///
/// ```
/// use gaprop_core::constraint::{Constrained, UnitInterval};
///
/// let eta = Constrained::<f64, UnitInterval>::new(0.86).unwrap();
/// assert_eq!(eta.get(), 0.86);
/// assert!(Constrained::<f64, UnitInterval>::new(1.2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    constraint: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// # Errors
    ///
    /// Returns the error of `C::check` if `value` is rejected.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value).map(|()| Self {
            value,
            constraint: PhantomData,
        })
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Copy, C: Constraint<T>> Constrained<T, C> {
    pub fn get(&self) -> T {
        self.value
    }
}
