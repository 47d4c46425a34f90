use gaprop_core::constraint::{Constrained, UnitInterval};
use thiserror::Error;

use crate::gas::PerfectGas;

/// Errors raised by [`compressor_exit_temperature`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum CompressionError {
    #[error("compressor pressure ratio must be at least one (got {0})")]
    PressureRatioBelowOne(f64),

    #[error("compressor efficiency must be greater than zero")]
    ZeroEfficiency,
}

/// Exit total temperature of a compression by `pressure_ratio`.
///
/// `Tt_out = Tt_in·(1 + (π^((γ-1)/γ) - 1) / η)`
///
/// # Errors
///
/// Returns a [`CompressionError`] if `pressure_ratio < 1` or `eta` is zero.
pub fn compressor_exit_temperature(
    inlet_temperature: f64,
    pressure_ratio: f64,
    eta: Constrained<f64, UnitInterval>,
    gas: &PerfectGas,
) -> Result<f64, CompressionError> {
    if pressure_ratio.is_nan() || pressure_ratio < 1.0 {
        return Err(CompressionError::PressureRatioBelowOne(pressure_ratio));
    }
    let eta = eta.get();
    if eta <= 0.0 {
        return Err(CompressionError::ZeroEfficiency);
    }

    let ideal_rise = pressure_ratio.powf(gas.isentropic_exponent()) - 1.0;
    Ok(inlet_temperature * (1.0 + ideal_rise / eta))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn eta(value: f64) -> Constrained<f64, UnitInterval> {
        UnitInterval::new(value).unwrap()
    }

    #[test]
    fn ideal_compression_is_isentropic() {
        let air = PerfectGas::AIR;
        let t_out = compressor_exit_temperature(288.15, 8.0, eta(1.0), &air).unwrap();
        assert_relative_eq!(t_out, 288.15 * 8f64.powf(0.4 / 1.4), max_relative = 1e-12);
    }

    #[test]
    fn losses_raise_exit_temperature() {
        let air = PerfectGas::AIR;
        let ideal = compressor_exit_temperature(300.0, 4.0, eta(1.0), &air).unwrap();
        let real = compressor_exit_temperature(300.0, 4.0, eta(0.85), &air).unwrap();

        assert!(real > ideal);
        assert_relative_eq!(real - 300.0, (ideal - 300.0) / 0.85, max_relative = 1e-12);
    }

    #[test]
    fn unit_ratio_leaves_temperature_unchanged() {
        let t = compressor_exit_temperature(250.0, 1.0, eta(0.8), &PerfectGas::AIR).unwrap();
        assert_relative_eq!(t, 250.0);
    }

    #[test]
    fn rejects_expansion_and_zero_efficiency() {
        let air = PerfectGas::AIR;
        assert_eq!(
            compressor_exit_temperature(300.0, 0.9, eta(0.8), &air),
            Err(CompressionError::PressureRatioBelowOne(0.9))
        );
        assert_eq!(
            compressor_exit_temperature(300.0, 2.0, eta(0.0), &air),
            Err(CompressionError::ZeroEfficiency)
        );
    }
}
