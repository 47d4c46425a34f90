use gaprop_core::constraint::{Constrained, UnitInterval};
use thiserror::Error;

use crate::gas::PerfectGas;

/// Errors raised by turbine relations.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum ExpansionError {
    /// The outlet pressure is above the inlet pressure.
    #[error("turbine pressure ratio must not exceed one (got {0})")]
    PressureRatioAboveOne(f64),

    /// The requested temperature drop exceeds what the efficiency allows.
    #[error(
        "temperature drop is non-physical (Tt_out/Tt_in={temperature_ratio}, eta={eta})"
    )]
    NonPhysicalExpansion { temperature_ratio: f64, eta: f64 },

    #[error("turbine efficiency must be greater than zero")]
    ZeroEfficiency,
}

/// Exit total temperature of an expansion to `pressure_ratio = Pt_out / Pt_in`.
///
/// `Tt_out = Tt_in·(1 - η·(1 - (Pt_out/Pt_in)^((γ-1)/γ)))`
///
/// # Errors
///
/// Returns [`ExpansionError::PressureRatioAboveOne`] if the outlet pressure
/// exceeds the inlet pressure.
pub fn turbine_exit_temperature(
    inlet_temperature: f64,
    pressure_ratio: f64,
    eta: Constrained<f64, UnitInterval>,
    gas: &PerfectGas,
) -> Result<f64, ExpansionError> {
    if pressure_ratio.is_nan() || pressure_ratio > 1.0 {
        return Err(ExpansionError::PressureRatioAboveOne(pressure_ratio));
    }

    let ideal_drop = 1.0 - pressure_ratio.powf(gas.isentropic_exponent());
    Ok(inlet_temperature * (1.0 - eta.get() * ideal_drop))
}

/// Pressure ratio `Pt_out / Pt_in` that takes the flow from `inlet_temperature`
/// to `outlet_temperature`.
///
/// # Errors
///
/// Returns [`ExpansionError::NonPhysicalExpansion`] when the temperature drop
/// cannot be reached with efficiency `eta` (the ideal outlet temperature would
/// be at or below absolute zero), or when the outlet is hotter than the inlet.
pub fn turbine_pressure_ratio(
    inlet_temperature: f64,
    outlet_temperature: f64,
    eta: Constrained<f64, UnitInterval>,
    gas: &PerfectGas,
) -> Result<f64, ExpansionError> {
    let eta = eta.get();
    if eta <= 0.0 {
        return Err(ExpansionError::ZeroEfficiency);
    }

    let temperature_ratio = outlet_temperature / inlet_temperature;
    let ideal_ratio = 1.0 - (1.0 - temperature_ratio) / eta;

    if ideal_ratio.is_nan() || ideal_ratio <= 0.0 || temperature_ratio > 1.0 {
        return Err(ExpansionError::NonPhysicalExpansion {
            temperature_ratio,
            eta,
        });
    }

    Ok(ideal_ratio.powf(1.0 / gas.isentropic_exponent()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn eta(value: f64) -> Constrained<f64, UnitInterval> {
        UnitInterval::new(value).unwrap()
    }

    #[test]
    fn pressure_ratio_inverts_exit_temperature() {
        let gas = PerfectGas::COMBUSTION_PRODUCTS;
        let t_out = turbine_exit_temperature(1350.0, 0.3, eta(0.86), &gas).unwrap();
        let ratio = turbine_pressure_ratio(1350.0, t_out, eta(0.86), &gas).unwrap();

        assert!(t_out < 1350.0);
        assert_relative_eq!(ratio, 0.3, max_relative = 1e-12);
    }

    #[test]
    fn zero_efficiency_extracts_nothing() {
        let gas = PerfectGas::COMBUSTION_PRODUCTS;
        let t_out = turbine_exit_temperature(1200.0, 0.2, eta(0.0), &gas).unwrap();
        assert_relative_eq!(t_out, 1200.0);
    }

    #[test]
    fn too_large_drop_is_non_physical() {
        let gas = PerfectGas::COMBUSTION_PRODUCTS;

        // With eta = 0.5 the actual drop can be at most half the inlet temperature.
        match turbine_pressure_ratio(1000.0, 400.0, eta(0.5), &gas) {
            Err(ExpansionError::NonPhysicalExpansion {
                temperature_ratio, ..
            }) => assert_relative_eq!(temperature_ratio, 0.4),
            other => panic!("expected a non-physical expansion, got {other:?}"),
        }
    }

    #[test]
    fn rejects_compression() {
        let gas = PerfectGas::COMBUSTION_PRODUCTS;
        assert_eq!(
            turbine_exit_temperature(1000.0, 1.2, eta(0.9), &gas),
            Err(ExpansionError::PressureRatioAboveOne(1.2))
        );
        assert!(turbine_pressure_ratio(1000.0, 1100.0, eta(0.9), &gas).is_err());
    }
}
