//! Finite-difference sensitivities of a flight point evaluation.
//!
//! Gradient-based aircraft sizing loops need the derivatives of thrust and
//! SFC with respect to the flight condition and the thrust command. The
//! engine model has no closed form, so they are estimated by forward
//! differences (backward at the upper end of the thrust rate range).

use uom::si::{
    f64::{Force, Length},
    force::newton,
    length::meter,
};

use crate::{
    EngineError,
    engine::Propulsion,
    flight_point::{FlightPoint, ThrustCommand},
};

const MACH_STEP: f64 = 1e-4;
/// Altitude step (m).
const ALTITUDE_STEP: f64 = 1.0;
const RATE_STEP: f64 = 1e-4;
/// Regulated thrust step relative to the commanded thrust.
const THRUST_RELATIVE_STEP: f64 = 1e-5;
/// Smallest regulated thrust step (N).
const THRUST_MIN_STEP: f64 = 1e-2;

/// Derivatives of one output.
///
/// `command` is per unit thrust rate for rate commands and per newton for
/// regulated thrust.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sensitivities {
    pub mach: f64,
    /// Per meter.
    pub altitude: f64,
    pub command: f64,
}

/// Derivatives of thrust (N) and SFC (kg/(N·s)) at a flight point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partials {
    pub thrust: Sensitivities,
    pub sfc: Sensitivities,
}

fn evaluate<E: Propulsion>(engine: &E, point: &FlightPoint) -> Result<(f64, f64), EngineError> {
    let mut points = [*point];
    let mut report = engine.compute_flight_points(&mut points);
    match report.failures.pop() {
        Some(failure) => Err(failure.error),
        None => Ok((points[0].thrust.get::<newton>(), points[0].sfc)),
    }
}

/// Estimates the partial derivatives of thrust and SFC at `point`.
///
/// # Errors
///
/// Returns the first evaluation error at the point or at a perturbed point.
pub fn partials<E: Propulsion>(engine: &E, point: &FlightPoint) -> Result<Partials, EngineError> {
    let (thrust, sfc) = evaluate(engine, point)?;

    let difference = |perturbed: FlightPoint, step: f64| -> Result<(f64, f64), EngineError> {
        let (t, s) = evaluate(engine, &perturbed)?;
        Ok(((t - thrust) / step, (s - sfc) / step))
    };

    let mut by_mach = *point;
    by_mach.mach += MACH_STEP;
    let (thrust_mach, sfc_mach) = difference(by_mach, MACH_STEP)?;

    let mut by_altitude = *point;
    by_altitude.altitude = point.altitude + Length::new::<meter>(ALTITUDE_STEP);
    let (thrust_altitude, sfc_altitude) = difference(by_altitude, ALTITUDE_STEP)?;

    let mut by_command = *point;
    let step = match point.command {
        ThrustCommand::Rate(rate) => {
            let step = if rate + RATE_STEP > 1.0 { -RATE_STEP } else { RATE_STEP };
            by_command.command = ThrustCommand::Rate(rate + step);
            step
        }
        ThrustCommand::Thrust(requested) => {
            let requested = requested.get::<newton>();
            let step = (requested.abs() * THRUST_RELATIVE_STEP).max(THRUST_MIN_STEP);
            by_command.command = ThrustCommand::Thrust(Force::new::<newton>(requested + step));
            step
        }
    };
    let (thrust_command, sfc_command) = difference(by_command, step)?;

    Ok(Partials {
        thrust: Sensitivities {
            mach: thrust_mach,
            altitude: thrust_altitude,
            command: thrust_command,
        },
        sfc: Sensitivities {
            mach: sfc_mach,
            altitude: sfc_altitude,
            command: sfc_command,
        },
    })
}
