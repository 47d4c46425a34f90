//! Grid scans that locate sign changes of a scalar residual.
//!
//! Bisection needs a bracket. When a residual has several roots, or fails to
//! evaluate over part of its domain, a scan over a grid picks the bracket
//! around the root of interest before handing it to [`bisection`].
//!
//! [`bisection`]: crate::equation::bisection

use super::bisection::Sign;

/// Returns `intervals + 1` points spaced evenly between `start` and `end`.
#[must_use]
pub fn linear_grid(start: f64, end: f64, intervals: usize) -> Vec<f64> {
    let n = intervals.max(1);
    (0..=n)
        .map(|i| start + (end - start) * (i as f64) / (n as f64))
        .collect()
}

/// Returns `intervals + 1` points spaced evenly in `ln(x)` between `start` and `end`.
///
/// Both ends must be positive.
#[must_use]
pub fn geometric_grid(start: f64, end: f64, intervals: usize) -> Vec<f64> {
    let n = intervals.max(1);
    let ratio = end / start;
    (0..=n)
        .map(|i| start * ratio.powf((i as f64) / (n as f64)))
        .collect()
}

/// Finds the last transition from a non-negative to a negative residual.
///
/// The residual is evaluated at every grid point. Failed evaluations and NaN
/// residuals count as negative. Returns the pair of adjacent grid points
/// `[x_i, x_{i+1}]` with the highest `i` such that the residual is
/// non-negative at `x_i` and negative at `x_{i+1}`, or `None` if no such pair
/// exists.
pub fn last_sign_change<F, E>(grid: &[f64], mut residual: F) -> Option<[f64; 2]>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    let signs: Vec<Sign> = grid
        .iter()
        .map(|&x| residual(x).map_or(Sign::Negative, Sign::of))
        .collect();

    grid.windows(2)
        .zip(signs.windows(2))
        .rev()
        .find(|(_, s)| s[0] == Sign::Positive && s[1] == Sign::Negative)
        .map(|(x, _)| [x[0], x[1]])
}

/// Finds the first grid point at which `accept` holds.
///
/// Points are visited in order and the scan stops at the first match.
pub fn first_accepted<F>(grid: &[f64], mut accept: F) -> Option<f64>
where
    F: FnMut(f64) -> bool,
{
    grid.iter().copied().find(|&x| accept(x))
}
