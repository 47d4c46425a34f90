use thiserror::Error;

/// Configuration for the bisection solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub max_iters: usize,
    pub x_abs_tol: f64,
    pub x_rel_tol: f64,
    pub residual_tol: f64,
}

/// A tolerance in [`Config`] that is negative or non-finite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{name} must be finite and non-negative")]
pub struct ConfigError {
    pub name: &'static str,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            x_abs_tol: 1e-12,
            x_rel_tol: 1e-12,
            residual_tol: 1e-12,
        }
    }
}

impl Config {
    /// Validates that all tolerances are finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first offending tolerance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("x_abs_tol", self.x_abs_tol),
            ("x_rel_tol", self.x_rel_tol),
            ("residual_tol", self.residual_tol),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError { name });
            }
        }
        Ok(())
    }
}
