//! Propeller efficiency maps.
//!
//! Each [`PerformanceTable`] tabulates efficiency over flight speed and thrust
//! at one reference altitude, together with the highest tabulated thrust at
//! each speed. A [`PropellerMap`] blends a sea-level and a cruise-altitude
//! table linearly in altitude. Lookups outside the grids are clamped to the
//! edge values.

use gaprop_components::interpolation::{Extrapolate, Interp1D, Interp2D, Strategy1D, Strategy2D};
use gaprop_core::constraint::{Constrained, StrictlyPositive};
use ndarray::{Array1, Array2};

use crate::{EngineError, design::Fraction};

/// Floor applied to denominators derived from flight conditions.
pub(crate) const EPS: f64 = 1e-6;

/// Propeller efficiency at one reference altitude.
#[derive(Debug, Clone)]
pub struct PerformanceTable {
    name: &'static str,
    min_speed: f64,
    min_thrust: f64,
    thrust_limit: Interp1D,
    efficiency: Interp2D,
}

impl PerformanceTable {
    /// Builds a table from its axes.
    ///
    /// `speed` (m/s) and `thrust` (N) are strictly increasing grids,
    /// `thrust_limit` has one entry per speed and `efficiency` has shape
    /// `(speed.len(), thrust.len())`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Table`] if an axis has fewer than two points, the
    /// shapes disagree, or the grids are not sorted.
    pub fn new(
        name: &'static str,
        speed: Array1<f64>,
        thrust: Array1<f64>,
        thrust_limit: Array1<f64>,
        efficiency: Array2<f64>,
    ) -> Result<Self, EngineError> {
        let table_error = |reason: String| EngineError::Table { table: name, reason };

        if speed.len() < 2 || thrust.len() < 2 {
            return Err(table_error(format!(
                "needs at least two speeds and two thrusts, got {} and {}",
                speed.len(),
                thrust.len()
            )));
        }
        if thrust_limit.len() != speed.len() {
            return Err(table_error(format!(
                "thrust_limit has {} entries for {} speeds",
                thrust_limit.len(),
                speed.len()
            )));
        }
        if efficiency.dim() != (speed.len(), thrust.len()) {
            return Err(table_error(format!(
                "efficiency has shape {:?}, expected ({}, {})",
                efficiency.dim(),
                speed.len(),
                thrust.len()
            )));
        }
        for (axis, grid) in [("speed", &speed), ("thrust", &thrust)] {
            let increasing = grid.iter().zip(grid.iter().skip(1)).all(|(a, b)| a < b);
            if !increasing {
                return Err(table_error(format!("{axis} grid must be strictly increasing")));
            }
        }
        if efficiency.iter().any(|eta| !(0.0..=1.0).contains(eta)) {
            return Err(table_error("efficiency values must lie in [0, 1]".into()));
        }

        let min_speed = speed[0];
        let min_thrust = thrust[0];

        let thrust_limit = Interp1D::new(
            speed.clone(),
            thrust_limit,
            Strategy1D::Linear,
            Extrapolate::Clamp,
        )
        .map_err(|e| table_error(e.to_string()))?;

        let efficiency = Interp2D::new(
            speed,
            thrust,
            efficiency,
            Strategy2D::Linear,
            Extrapolate::Clamp,
        )
        .map_err(|e| table_error(e.to_string()))?;

        Ok(Self {
            name,
            min_speed,
            min_thrust,
            thrust_limit,
            efficiency,
        })
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Lowest tabulated speed (m/s).
    #[must_use]
    pub fn min_speed(&self) -> f64 {
        self.min_speed
    }

    /// Lowest tabulated thrust (N).
    #[must_use]
    pub fn min_thrust(&self) -> f64 {
        self.min_thrust
    }

    /// Highest tabulated thrust at `speed`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Table`] if the lookup fails.
    pub fn thrust_limit(&self, speed: f64) -> Result<f64, EngineError> {
        self.thrust_limit.eval(speed).map_err(|e| self.lookup_error(e))
    }

    /// Efficiency at `(speed, thrust)`, with thrust held inside the tabulated
    /// range for that speed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Table`] if the lookup fails.
    pub fn efficiency(&self, speed: f64, thrust: f64) -> Result<f64, EngineError> {
        let upper = self.thrust_limit(speed)?;
        let thrust = thrust.max(self.min_thrust).min(upper);
        self.efficiency
            .eval(speed, thrust)
            .map_err(|e| self.lookup_error(e))
    }

    fn lookup_error(&self, error: impl ToString) -> EngineError {
        EngineError::Table {
            table: self.name,
            reason: error.to_string(),
        }
    }
}

/// Sea-level and cruise-altitude tables with their installation corrections.
#[derive(Debug, Clone)]
pub struct PropellerMap {
    pub sea_level: PerformanceTable,
    pub cruise: PerformanceTable,
    /// Reference altitude of the cruise table (m).
    pub cruise_altitude: Constrained<f64, StrictlyPositive>,
    /// Effective advance ratio correction on the power balance.
    pub effective_advance_ratio: Constrained<f64, StrictlyPositive>,
    /// Installed efficiency factor applied to the sea-level table.
    pub installed_efficiency_sea_level: Fraction,
    /// Installed efficiency factor applied to the cruise table.
    pub installed_efficiency_cruise: Fraction,
}

impl PropellerMap {
    /// Blend weight of the cruise table at `altitude` (m), within `[0, 1]`.
    #[must_use]
    pub fn altitude_fraction(&self, altitude: f64) -> f64 {
        let cruise = self.cruise_altitude.get();
        altitude.clamp(0.0, cruise) / cruise
    }

    /// Lowest thrust covered by either table (N).
    #[must_use]
    pub fn min_thrust(&self) -> f64 {
        self.sea_level.min_thrust().min(self.cruise.min_thrust())
    }

    /// Speed used in the power balance, floored at the lowest tabulated speed.
    fn balance_speed(&self, speed: f64) -> f64 {
        speed.max(self.sea_level.min_speed().min(self.cruise.min_speed()))
    }

    /// Highest thrust the propeller map covers at `(speed, altitude)`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Table`] if a lookup fails.
    pub fn thrust_limit(&self, speed: f64, altitude: f64) -> Result<f64, EngineError> {
        let low = self.sea_level.thrust_limit(speed)?;
        let high = self.cruise.thrust_limit(speed)?;
        Ok(lerp(low, high, self.altitude_fraction(altitude)))
    }

    /// Installed propeller efficiency.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Table`] if a lookup fails.
    pub fn efficiency(&self, thrust: f64, speed: f64, altitude: f64) -> Result<f64, EngineError> {
        let low = self.sea_level.efficiency(speed, thrust)?
            * self.installed_efficiency_sea_level.get();
        let high =
            self.cruise.efficiency(speed, thrust)? * self.installed_efficiency_cruise.get();
        Ok(lerp(low, high, self.altitude_fraction(altitude)))
    }

    /// Shaft power (W) needed to produce `thrust` at `(speed, altitude)`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Table`] if a lookup fails.
    pub fn required_power(
        &self,
        thrust: f64,
        speed: f64,
        altitude: f64,
    ) -> Result<f64, EngineError> {
        let eta = self.efficiency(thrust, speed, altitude)?;
        Ok(thrust * self.effective_advance_ratio.get() * self.balance_speed(speed) / eta.max(EPS))
    }
}

fn lerp(low: f64, high: f64, fraction: f64) -> f64 {
    low + (high - low) * fraction
}
