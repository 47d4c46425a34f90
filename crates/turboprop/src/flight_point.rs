//! Flight points: the inputs and outputs of an engine evaluation.

use uom::si::{
    f64::{Force, Length},
    force::newton,
    length::meter,
};

use crate::{EngineError, EngineSetting};

/// What the caller asks of the engine at a flight point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThrustCommand {
    /// Fraction of the maximum thrust available, in `[0, 1]`.
    Rate(f64),
    /// Regulated thrust.
    Thrust(Force),
}

/// One operating condition and its evaluated thrust and fuel consumption.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightPoint {
    pub mach: f64,
    pub altitude: Length,
    pub setting: EngineSetting,
    pub command: ThrustCommand,

    /// Evaluated thrust.
    pub thrust: Force,
    /// Evaluated thrust as a fraction of the maximum thrust.
    pub thrust_rate: f64,
    /// Specific fuel consumption (kg/(N·s)).
    pub sfc: f64,
}

impl FlightPoint {
    /// A point commanded by thrust rate.
    #[must_use]
    pub fn with_rate(altitude: Length, mach: f64, setting: EngineSetting, rate: f64) -> Self {
        Self::new(altitude, mach, setting, ThrustCommand::Rate(rate))
    }

    /// A point commanded by regulated thrust.
    #[must_use]
    pub fn with_thrust(altitude: Length, mach: f64, setting: EngineSetting, thrust: Force) -> Self {
        Self::new(altitude, mach, setting, ThrustCommand::Thrust(thrust))
    }

    fn new(altitude: Length, mach: f64, setting: EngineSetting, command: ThrustCommand) -> Self {
        Self {
            mach,
            altitude,
            setting,
            command,
            thrust: Force::new::<newton>(0.0),
            thrust_rate: 0.0,
            sfc: 0.0,
        }
    }

    /// Clears the evaluated fields.
    pub(crate) fn reset_outputs(&mut self) {
        self.thrust = Force::new::<newton>(0.0);
        self.thrust_rate = 0.0;
        self.sfc = 0.0;
    }
}

/// A point that could not be evaluated.
#[derive(Debug)]
pub struct PointFailure {
    pub index: usize,
    pub error: EngineError,
}

/// Outcome of a batch evaluation.
///
/// Failed points keep zero thrust and SFC; the batch itself never aborts.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub failures: Vec<PointFailure>,
}

impl BatchReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Flight points as parallel arrays.
///
/// Altitudes are in meters and thrusts in newtons. `thrust_is_regulated`
/// selects, per point, whether `thrust` or `thrust_rate` is the command;
/// evaluation fills the other one along with `sfc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightPointBatch {
    pub mach: Vec<f64>,
    pub altitude: Vec<f64>,
    pub setting: Vec<i64>,
    pub thrust_is_regulated: Vec<bool>,
    pub thrust_rate: Vec<f64>,
    pub thrust: Vec<f64>,
    pub sfc: Vec<f64>,
}

impl FlightPointBatch {
    #[must_use]
    pub fn len(&self) -> usize {
        self.mach.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mach.is_empty()
    }

    /// Converts the arrays into flight points.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::BatchLength`] if an input array length differs
    /// from `mach`, or [`EngineError::UnknownLimit`] for an unknown setting code.
    pub fn to_points(&self) -> Result<Vec<FlightPoint>, EngineError> {
        let expected = self.len();
        for (field, actual) in [
            ("altitude", self.altitude.len()),
            ("setting", self.setting.len()),
            ("thrust_is_regulated", self.thrust_is_regulated.len()),
            ("thrust_rate", self.thrust_rate.len()),
            ("thrust", self.thrust.len()),
        ] {
            if actual != expected {
                return Err(EngineError::BatchLength {
                    field,
                    expected,
                    actual,
                });
            }
        }

        (0..expected)
            .map(|i| {
                let altitude = Length::new::<meter>(self.altitude[i]);
                let setting = EngineSetting::try_from(self.setting[i])?;
                Ok(if self.thrust_is_regulated[i] {
                    FlightPoint::with_thrust(
                        altitude,
                        self.mach[i],
                        setting,
                        Force::new::<newton>(self.thrust[i]),
                    )
                } else {
                    FlightPoint::with_rate(altitude, self.mach[i], setting, self.thrust_rate[i])
                })
            })
            .collect()
    }

    /// Writes evaluated thrust, thrust rate and SFC back into the arrays.
    pub(crate) fn store(&mut self, points: &[FlightPoint]) {
        self.thrust = points.iter().map(|p| p.thrust.get::<newton>()).collect();
        self.thrust_rate = points.iter().map(|p| p.thrust_rate).collect();
        self.sfc = points.iter().map(|p| p.sfc).collect();
    }
}
