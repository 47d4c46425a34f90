//! Power and thrust ceilings at a flight point.
//!
//! The gas generator may run anywhere between the idle floor and the
//! turbine entry temperature ceiling. Within that window the ITT and OPR
//! limits each cap the power; the flat power rating caps it again, and the
//! smallest of the three wins.

use gaprop_solvers::equation::scan;
use log::debug;
use uom::si::{
    f64::{Force, Power},
    force::newton,
    power::watt,
};

use crate::{
    EngineError,
    cycle::{FlightCondition, GasGenerator, OperatingPoint},
    propeller::PropellerMap,
    root,
};

/// Highest turbine entry temperature the model will run (K).
pub(crate) const T41_CEILING: f64 = 2000.0;
const IDLE_SCAN_INTERVALS: usize = 60;

/// The limit that set the available power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limit {
    /// Power turbine inlet temperature.
    Itt,
    /// Overall pressure ratio.
    Opr,
    /// Flat-rated shaft power.
    Power,
}

/// Ceilings at one flight point and engine setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineLimits {
    /// Propeller shaft power available, after the setting rating.
    pub max_power: Power,
    /// Thrust produced with `max_power`.
    pub max_thrust: Force,
    pub binding: Limit,
}

/// Range of turbine entry temperatures over which the engine runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct OperatingWindow {
    pub floor: f64,
    pub ceiling: f64,
}

/// Limit values in SI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LimitValues {
    pub itt: f64,
    pub opr: f64,
    pub power: f64,
}

impl GasGenerator {
    /// Finds the idle floor: the coolest turbine entry temperature on a
    /// uniform scan that matches and delivers positive shaft power.
    pub(crate) fn operating_window(
        &self,
        condition: &FlightCondition,
    ) -> Result<OperatingWindow, EngineError> {
        let start = 1.5 * condition.tt2;
        let grid = scan::linear_grid(start, T41_CEILING, IDLE_SCAN_INTERVALS);

        let floor = scan::first_accepted(&grid, |t41| {
            self.operate(condition, t41).is_ok_and(|op| op.shaft_power > 0.0)
        })
        .ok_or_else(|| condition.no_operating_point(T41_CEILING))?;

        Ok(OperatingWindow {
            floor,
            ceiling: T41_CEILING,
        })
    }

    /// Runs the engine at the temperature where `quantity` reaches `target`.
    ///
    /// A target above the window binds at the ceiling, one below it at the floor.
    pub(crate) fn operate_at_limit(
        &self,
        condition: &FlightCondition,
        window: OperatingWindow,
        name: &'static str,
        quantity: fn(&OperatingPoint) -> f64,
        target: f64,
    ) -> Result<OperatingPoint, EngineError> {
        let excess = |t41: f64| self.operate(condition, t41).map(|op| quantity(&op) - target);

        let top = self.operate(condition, window.ceiling)?;
        if quantity(&top) - target <= 0.0 {
            return Ok(top);
        }
        let bottom = self.operate(condition, window.floor)?;
        if quantity(&bottom) - target >= 0.0 {
            debug!("{name} limit {target} already exceeded at the idle floor");
            return Ok(bottom);
        }

        let t41 = root::solve(name, [window.floor, window.ceiling], excess)?;
        self.operate(condition, t41)
    }

    /// Shaft power available before the setting rating, with the limit that set it.
    pub(crate) fn available_power(
        &self,
        condition: &FlightCondition,
        window: OperatingWindow,
        limits: &LimitValues,
    ) -> Result<(f64, Limit), EngineError> {
        let itt = self.operate_at_limit(condition, window, "ITT", |op| op.itt, limits.itt)?;
        let opr = self.operate_at_limit(condition, window, "OPR", |op| op.opr, limits.opr)?;

        let (power, binding) = [
            (itt.shaft_power, Limit::Itt),
            (opr.shaft_power, Limit::Opr),
            (limits.power, Limit::Power),
        ]
        .into_iter()
        .fold((f64::INFINITY, Limit::Power), |best, next| {
            if next.0 < best.0 { next } else { best }
        });

        debug!(
            "available power {power:.1} W at h={} m, M={} set by {binding:?} \
             (ITT {:.1} W, OPR {:.1} W)",
            condition.altitude, condition.mach, itt.shaft_power, opr.shaft_power
        );
        Ok((power, binding))
    }
}

/// Thrust the propeller produces with `power` at `condition`.
///
/// The result is capped at the thrust limit of the propeller map. Below the
/// lowest tabulated thrust the efficiency is held, so required power falls
/// linearly to zero at zero thrust.
pub(crate) fn thrust_for_power(
    propeller: &PropellerMap,
    condition: &FlightCondition,
    power: f64,
) -> Result<f64, EngineError> {
    let (speed, altitude) = (condition.speed, condition.altitude);
    let surplus = |thrust: f64| {
        propeller
            .required_power(thrust, speed, altitude)
            .map(|required| required - power)
    };

    let lowest = propeller.min_thrust();
    let highest = propeller.thrust_limit(speed, altitude)?;
    if surplus(highest)? <= 0.0 {
        return Ok(highest);
    }
    let bracket = if surplus(lowest)? > 0.0 {
        [0.0, lowest]
    } else {
        [lowest, highest]
    };
    root::solve("thrust at available power", bracket, surplus)
}

pub(crate) fn engine_limits(power: f64, thrust: f64, binding: Limit) -> EngineLimits {
    EngineLimits {
        max_power: Power::new::<watt>(power),
        max_thrust: Force::new::<newton>(thrust),
        binding,
    }
}
