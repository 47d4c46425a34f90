//! Several identical engines evaluated as one propulsion system.

use uom::si::{
    f64::{Force, Mass, Time},
    force::newton,
    mass::kilogram,
    time::second,
};

use crate::{
    EngineError,
    engine::Propulsion,
    flight_point::{BatchReport, FlightPoint, ThrustCommand},
};

/// `count` identical engines sharing the commanded thrust evenly.
#[derive(Debug, Clone)]
pub struct EngineSet<E> {
    pub engine: E,
    count: usize,
}

impl<E: Propulsion> EngineSet<E> {
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] if `count` is zero.
    pub fn new(engine: E, count: usize) -> Result<Self, EngineError> {
        if count == 0 {
            return Err(EngineError::invalid("engine_count", "must be at least one"));
        }
        Ok(Self { engine, count })
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Fuel burned by the whole set over `duration` at an evaluated point.
    #[must_use]
    pub fn consumed_mass(&self, point: &FlightPoint, duration: Time) -> Mass {
        Mass::new::<kilogram>(point.sfc * point.thrust.get::<newton>() * duration.get::<second>())
    }
}

impl<E: Propulsion> Propulsion for EngineSet<E> {
    /// Evaluates points whose thrust command and outputs refer to the whole set.
    fn compute_flight_points(&self, points: &mut [FlightPoint]) -> BatchReport {
        let n = self.count as f64;

        for point in points.iter_mut() {
            if let ThrustCommand::Thrust(total) = point.command {
                point.command = ThrustCommand::Thrust(total / n);
            }
        }

        let report = self.engine.compute_flight_points(points);

        for point in points.iter_mut() {
            if let ThrustCommand::Thrust(single) = point.command {
                point.command = ThrustCommand::Thrust(single * n);
            }
            point.thrust = Force::new::<newton>(point.thrust.get::<newton>() * n);
        }
        report
    }

    fn compute_weight(&self) -> Mass {
        self.engine.compute_weight() * self.count as f64
    }

    fn compute_drag(&self, mach: f64, unit_reynolds: f64, wing_mac: f64) -> f64 {
        self.engine.compute_drag(mach, unit_reynolds, wing_mac) * self.count as f64
    }
}
