use thiserror::Error;

use super::Config;

/// Why a pair of endpoints cannot seed a bisection.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BracketError {
    #[error("bracket endpoints must be finite")]
    NonFinite,
    #[error("bracket endpoints coincide")]
    ZeroWidth,
    #[error("residual has the same sign at both endpoints")]
    NoSignChange,
}

/// Residual sign used to keep the bracket around a root.
///
/// Zero counts as positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// NaN is negative.
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

/// Orders finite, distinct endpoints.
pub(super) fn ordered([a, b]: [f64; 2]) -> Result<[f64; 2], BracketError> {
    if !(a.is_finite() && b.is_finite()) {
        return Err(BracketError::NonFinite);
    }
    match a.partial_cmp(&b) {
        Some(std::cmp::Ordering::Less) => Ok([a, b]),
        Some(std::cmp::Ordering::Greater) => Ok([b, a]),
        _ => Err(BracketError::ZeroWidth),
    }
}

/// An interval whose endpoint residuals have opposite signs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    lower: f64,
    upper: f64,
    lower_sign: Sign,
}

impl Bracket {
    pub(super) fn new(
        [lower, upper]: [f64; 2],
        lower_sign: Sign,
        upper_sign: Sign,
    ) -> Result<Self, BracketError> {
        if lower_sign == upper_sign {
            return Err(BracketError::NoSignChange);
        }
        Ok(Self {
            lower,
            upper,
            lower_sign,
        })
    }

    #[must_use]
    pub fn bounds(&self) -> [f64; 2] {
        [self.lower, self.upper]
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether the width is within `x_abs_tol + x_rel_tol * |midpoint|`.
    #[must_use]
    pub fn is_x_converged(&self, config: &Config) -> bool {
        self.width() <= config.x_abs_tol + config.x_rel_tol * self.midpoint().abs()
    }

    /// Replaces the endpoint that shares the sign of `x`.
    pub(super) fn narrow(&mut self, x: f64, sign: Sign) {
        if sign == self.lower_sign {
            self.lower = x;
        } else {
            self.upper = x;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn endpoints_are_ordered_and_checked() {
        assert_eq!(ordered([3.0, 1.0]), Ok([1.0, 3.0]));
        assert_eq!(ordered([f64::NAN, 1.0]), Err(BracketError::NonFinite));
        assert_eq!(ordered([0.0, f64::INFINITY]), Err(BracketError::NonFinite));
        assert_eq!(ordered([2.0, 2.0]), Err(BracketError::ZeroWidth));
    }

    #[test]
    fn same_signs_do_not_bracket() {
        let err = Bracket::new([0.0, 1.0], Sign::Negative, Sign::Negative);
        assert_eq!(err, Err(BracketError::NoSignChange));
    }

    #[test]
    fn narrowing_keeps_the_sign_change() {
        let mut bracket = Bracket::new([0.0, 2.0], Sign::Positive, Sign::Negative).unwrap();

        bracket.narrow(1.0, Sign::Positive);
        assert_eq!(bracket.bounds(), [1.0, 2.0]);

        bracket.narrow(1.5, Sign::Negative);
        assert_eq!(bracket.bounds(), [1.0, 1.5]);
        assert_relative_eq!(bracket.midpoint(), 1.25);
    }

    #[test]
    fn convergence_uses_both_tolerances() {
        let bracket = Bracket::new([100.0, 100.5], Sign::Negative, Sign::Positive).unwrap();
        let config = Config {
            x_abs_tol: 0.1,
            x_rel_tol: 0.0,
            ..Config::default()
        };
        assert!(!bracket.is_x_converged(&config));
        assert!(bracket.is_x_converged(&Config { x_rel_tol: 0.01, ..config }));
    }
}
