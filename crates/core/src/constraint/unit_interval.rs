use num_traits::{One, Zero};

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value lies in the closed unit interval `[0, 1]`.
///
/// Used for efficiencies, fractions and rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitInterval;

impl UnitInterval {
    /// Constructs a [`Constrained<T, UnitInterval>`] if `0 <= value <= 1`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::BelowMinimum`], [`ConstraintError::AboveMaximum`]
    /// or [`ConstraintError::NotANumber`].
    pub fn new<T: PartialOrd + Zero + One>(
        value: T,
    ) -> Result<Constrained<T, UnitInterval>, ConstraintError> {
        Constrained::<T, UnitInterval>::new(value)
    }

    /// Returns one wrapped as a unit-interval value.
    #[must_use]
    pub fn one<T: PartialOrd + Zero + One>() -> Constrained<T, UnitInterval> {
        Constrained {
            value: T::one(),
            constraint: std::marker::PhantomData,
        }
    }
}

impl<T: PartialOrd + Zero + One> Constraint<T> for UnitInterval {
    fn check(value: &T) -> Result<(), ConstraintError> {
        if value.partial_cmp(&T::zero()).is_none() {
            return Err(ConstraintError::NotANumber);
        }
        if *value < T::zero() {
            return Err(ConstraintError::BelowMinimum);
        }
        if *value > T::one() {
            return Err(ConstraintError::AboveMaximum);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert!(UnitInterval::new(0.0).is_ok());
        assert!(UnitInterval::new(1.0).is_ok());
        assert!(UnitInterval::new(0.86).is_ok());
        assert_eq!(UnitInterval::one::<f64>().into_inner(), 1.0);
    }

    #[test]
    fn rejects_values_outside() {
        assert_eq!(UnitInterval::new(-0.1), Err(ConstraintError::BelowMinimum));
        assert_eq!(UnitInterval::new(1.1), Err(ConstraintError::AboveMaximum));
        assert_eq!(UnitInterval::new(f64::NAN), Err(ConstraintError::NotANumber));
    }
}
