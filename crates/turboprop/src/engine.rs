//! The basic turboprop model.

use log::{debug, info, warn};
use uom::si::{
    f64::{Force, Length, Mass, Power},
    force::newton,
    length::meter,
    mass_rate::kilogram_per_second,
    power::{kilowatt, watt},
    thermodynamic_temperature::kelvin,
};

use crate::{
    EngineDesignSpec, EngineError, EngineSetting,
    cycle::{Cycle, FlightCondition, GasGenerator, OperatingPoint, Sizing},
    dimensions::NacelleDimensions,
    flight_point::{BatchReport, FlightPoint, FlightPointBatch, PointFailure, ThrustCommand},
    limits::{EngineLimits, Limit, LimitValues, OperatingWindow, engine_limits, thrust_for_power},
    mass::uninstalled_weight,
    propeller::{EPS, PropellerMap},
    root,
};

/// Common interface of engine models used by the aircraft performance code.
pub trait Propulsion {
    /// Evaluates thrust and SFC for every point in place.
    ///
    /// Points that fail are listed in the report and keep zero outputs.
    fn compute_flight_points(&self, points: &mut [FlightPoint]) -> BatchReport;

    /// Engine weight.
    fn compute_weight(&self) -> Mass;

    /// Nacelle drag coefficient contribution.
    fn compute_drag(&self, mach: f64, unit_reynolds: f64, wing_mac: f64) -> f64;
}

/// Turboprop performance model: a sized gas generator driving a propeller
/// through a gearbox.
#[derive(Debug, Clone)]
pub struct BasicTurboprop {
    spec: EngineDesignSpec,
    propeller: PropellerMap,
    generator: GasGenerator,
}

impl BasicTurboprop {
    /// Validates the design and sizes the engine.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] for an invalid design and
    /// [`EngineError::ImpossibleGeometry`] when the design cannot be sized.
    pub fn new(spec: EngineDesignSpec, propeller: PropellerMap) -> Result<Self, EngineError> {
        spec.validate()?;
        let cycle = Cycle::from_spec(&spec)?;
        let sizing = Sizing::at_design(&cycle, &spec)?;

        info!(
            "sized turboprop: {:.1} kW at T41 {:.0} K, OPR {}, core flow {:.4} kg/s, \
             A41 {:.3e} m², A45 {:.3e} m², A8 {:.3e} m²",
            spec.design.power.get::<kilowatt>(),
            spec.design.turbine_inlet_temperature.get::<kelvin>(),
            spec.design.overall_pressure_ratio.get(),
            sizing.core_mass_flow().get::<kilogram_per_second>(),
            sizing.a41,
            sizing.a45,
            sizing.a8,
        );

        Ok(Self {
            spec,
            propeller,
            generator: GasGenerator { cycle, sizing },
        })
    }

    /// Design parameters the engine was sized from.
    #[must_use]
    pub fn spec(&self) -> &EngineDesignSpec {
        &self.spec
    }

    /// Propeller performance tables.
    #[must_use]
    pub fn propeller(&self) -> &PropellerMap {
        &self.propeller
    }

    /// Sizing constants fixed at construction.
    #[must_use]
    pub fn sizing(&self) -> &Sizing {
        &self.generator.sizing
    }

    pub(crate) fn generator(&self) -> &GasGenerator {
        &self.generator
    }

    pub(crate) fn limit_values(&self) -> LimitValues {
        let limits = &self.spec.limits;
        LimitValues {
            itt: limits.itt.get::<kelvin>(),
            opr: limits.opr.get(),
            power: limits.power.get::<watt>(),
        }
    }

    fn condition(&self, point: &FlightPoint) -> Result<FlightCondition, EngineError> {
        if !(point.mach.is_finite() && point.mach >= 0.0) {
            return Err(EngineError::invalid(
                "mach",
                format!("must be finite and >= 0, got {}", point.mach),
            ));
        }
        let altitude = point.altitude.get::<meter>();
        if !altitude.is_finite() {
            return Err(EngineError::invalid("altitude", "must be finite"));
        }
        Ok(self.generator.cycle.flight_condition(altitude, point.mach))
    }

    /// Available power and thrust with the limit that set them.
    fn limits_at(
        &self,
        condition: &FlightCondition,
        window: OperatingWindow,
        point: &FlightPoint,
    ) -> Result<EngineLimits, EngineError> {
        let (power, binding) =
            self.generator
                .available_power(condition, window, &self.limit_values())?;
        let power = power * self.spec.ratings.for_setting(point.setting);
        let thrust = thrust_for_power(&self.propeller, condition, power)?;
        Ok(engine_limits(power, thrust, binding))
    }

    /// Power and thrust ceilings at `point` for its engine setting.
    ///
    /// # Errors
    ///
    /// Returns an error if the flight condition is invalid or the engine
    /// cannot run there.
    pub fn compute_limits(&self, point: &FlightPoint) -> Result<EngineLimits, EngineError> {
        let condition = self.condition(point)?;
        let window = self.generator.operating_window(&condition)?;
        self.limits_at(&condition, window, point)
    }

    /// Maximum propeller shaft power at `point`.
    ///
    /// # Errors
    ///
    /// See [`BasicTurboprop::compute_limits`].
    pub fn compute_max_power(&self, point: &FlightPoint) -> Result<Power, EngineError> {
        self.compute_limits(point).map(|limits| limits.max_power)
    }

    /// Maximum thrust at `point`.
    ///
    /// # Errors
    ///
    /// See [`BasicTurboprop::compute_limits`].
    pub fn compute_max_thrust(&self, point: &FlightPoint) -> Result<Force, EngineError> {
        self.compute_limits(point).map(|limits| limits.max_thrust)
    }

    /// Evaluates thrust, thrust rate and SFC of one point.
    ///
    /// The outputs are zero if evaluation fails.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid command or flight condition, or when
    /// the engine cannot run at the point.
    pub fn compute_flight_point(&self, point: &mut FlightPoint) -> Result<(), EngineError> {
        point.reset_outputs();

        let condition = self.condition(point)?;
        let window = self.generator.operating_window(&condition)?;
        let limits = self.limits_at(&condition, window, point)?;
        let max_thrust = limits.max_thrust.get::<newton>();

        let (thrust, rate) = match point.command {
            ThrustCommand::Rate(rate) => {
                if rate.is_nan() {
                    return Err(EngineError::invalid("thrust_rate", "is not a number"));
                }
                let clamped = rate.clamp(0.0, 1.0);
                #[allow(clippy::float_cmp)]
                if clamped != rate {
                    warn!("thrust rate {rate} outside [0, 1], using {clamped}");
                }
                (clamped * max_thrust, clamped)
            }
            ThrustCommand::Thrust(thrust) => {
                let requested = thrust.get::<newton>();
                if !(requested.is_finite() && requested >= 0.0) {
                    return Err(EngineError::invalid(
                        "thrust",
                        format!("must be finite and >= 0, got {requested} N"),
                    ));
                }
                let thrust = if requested > max_thrust {
                    warn!(
                        "regulated thrust {requested:.1} N exceeds the {max_thrust:.1} N \
                         available at h={} m, M={}; clipping",
                        condition.altitude, condition.mach
                    );
                    max_thrust
                } else {
                    requested
                };
                (thrust, thrust / max_thrust.max(EPS))
            }
        };

        let op = self.operate_for_thrust(&condition, window, thrust)?;

        point.thrust = Force::new::<newton>(thrust);
        point.thrust_rate = rate;
        point.sfc = op.fuel_flow / thrust.max(EPS);
        Ok(())
    }

    /// Evaluates a batch given as parallel arrays and writes the outputs back.
    ///
    /// # Errors
    ///
    /// Returns an error only if the arrays cannot be read as flight points;
    /// per-point failures are listed in the report.
    pub fn compute_flight_batch(
        &self,
        batch: &mut FlightPointBatch,
    ) -> Result<BatchReport, EngineError> {
        let mut points = batch.to_points()?;
        let report = self.compute_flight_points(&mut points);
        batch.store(&points);
        Ok(report)
    }

    /// Runs the engine at the turbine temperature whose shaft power drives the
    /// propeller at `thrust`.
    fn operate_for_thrust(
        &self,
        condition: &FlightCondition,
        window: OperatingWindow,
        thrust: f64,
    ) -> Result<OperatingPoint, EngineError> {
        let required = self
            .propeller
            .required_power(thrust, condition.speed, condition.altitude)?;

        let floor = self.generator.operate(condition, window.floor)?;
        if floor.shaft_power >= required {
            debug!(
                "{required:.1} W needed for {thrust:.1} N is below idle ({:.1} W); running at the idle floor",
                floor.shaft_power
            );
            return Ok(floor);
        }
        let ceiling = self.generator.operate(condition, window.ceiling)?;
        if ceiling.shaft_power <= required {
            debug!("{required:.1} W needed for {thrust:.1} N is above the T41 ceiling");
            return Ok(ceiling);
        }

        let t41 = root::solve("turbine entry temperature", [window.floor, window.ceiling], |t41| {
            self.generator
                .operate(condition, t41)
                .map(|op| op.shaft_power - required)
        })?;
        self.generator.operate(condition, t41)
    }

    /// Nacelle dimensions for the design power and propeller layout.
    #[must_use]
    pub fn compute_dimensions(&self) -> NacelleDimensions {
        NacelleDimensions::for_engine(
            self.spec.design.power.get::<kilowatt>(),
            self.spec.installation.propeller_layout,
        )
    }

    /// Maximum power at an altitude and Mach number for `setting`.
    ///
    /// # Errors
    ///
    /// See [`BasicTurboprop::compute_limits`].
    pub fn max_power_at(
        &self,
        altitude: Length,
        mach: f64,
        setting: EngineSetting,
    ) -> Result<Power, EngineError> {
        self.compute_max_power(&FlightPoint::with_rate(altitude, mach, setting, 1.0))
    }

    /// The limit setting the available power at `point`.
    ///
    /// # Errors
    ///
    /// See [`BasicTurboprop::compute_limits`].
    pub fn binding_limit(&self, point: &FlightPoint) -> Result<Limit, EngineError> {
        self.compute_limits(point).map(|limits| limits.binding)
    }
}

impl Propulsion for BasicTurboprop {
    fn compute_flight_points(&self, points: &mut [FlightPoint]) -> BatchReport {
        let failures = points
            .iter_mut()
            .enumerate()
            .filter_map(|(index, point)| {
                self.compute_flight_point(point)
                    .err()
                    .map(|error| PointFailure { index, error })
            })
            .collect();
        BatchReport { failures }
    }

    fn compute_weight(&self) -> Mass {
        let d = &self.spec.design;
        uninstalled_weight(
            d.power.get::<kilowatt>(),
            d.turbine_inlet_temperature.get::<kelvin>(),
            d.overall_pressure_ratio.get(),
        )
    }

    /// Nacelle drag is accounted for by the airframe model, so this is zero.
    fn compute_drag(&self, _mach: f64, _unit_reynolds: f64, _wing_mac: f64) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::mass::pound;

    use crate::test_utils::{reference_engine, reference_spec};

    fn at(altitude: f64, mach: f64, command: ThrustCommand) -> FlightPoint {
        let altitude = Length::new::<meter>(altitude);
        match command {
            ThrustCommand::Rate(rate) => {
                FlightPoint::with_rate(altitude, mach, EngineSetting::Takeoff, rate)
            }
            ThrustCommand::Thrust(thrust) => {
                FlightPoint::with_thrust(altitude, mach, EngineSetting::Takeoff, thrust)
            }
        }
    }

    #[test]
    fn flat_rated_at_design_condition() {
        let engine = reference_engine();
        let power = engine
            .compute_max_power(&at(0.0, 0.5, ThrustCommand::Rate(1.0)))
            .unwrap();
        assert_relative_eq!(power.get::<kilowatt>(), 521.99, epsilon = 1e-9);
    }

    #[test]
    fn regulated_thrust_is_clipped_to_max() {
        let engine = reference_engine();
        let mut point = at(0.0, 0.3, ThrustCommand::Thrust(Force::new::<newton>(9000.0)));
        engine.compute_flight_point(&mut point).unwrap();

        assert_relative_eq!(point.thrust.get::<newton>(), 4426.489, max_relative = 1e-4);
        assert_relative_eq!(point.thrust_rate, 1.0, epsilon = 1e-9);
        assert_relative_eq!(point.sfc, 1.373_875e-5, max_relative = 1e-3);
    }

    #[test]
    fn rate_above_one_is_clamped() {
        let engine = reference_engine();
        let mut over = at(0.0, 0.3, ThrustCommand::Rate(1.4));
        let mut full = at(0.0, 0.3, ThrustCommand::Rate(1.0));
        engine.compute_flight_point(&mut over).unwrap();
        engine.compute_flight_point(&mut full).unwrap();

        assert_relative_eq!(over.thrust_rate, 1.0);
        assert_relative_eq!(over.thrust.get::<newton>(), full.thrust.get::<newton>());
    }

    #[test]
    fn zero_thrust_runs_at_idle_with_floored_sfc() {
        let engine = reference_engine();
        let mut point = at(0.0, 0.3, ThrustCommand::Rate(0.0));
        engine.compute_flight_point(&mut point).unwrap();

        assert_relative_eq!(point.thrust.get::<newton>(), 0.0);
        assert!(point.sfc.is_finite() && point.sfc > 0.0);
    }

    #[test]
    fn batch_reports_failures_and_continues() {
        let engine = reference_engine();
        let mut points = [
            at(0.0, 0.3, ThrustCommand::Rate(0.5)),
            at(0.0, -0.2, ThrustCommand::Rate(0.5)),
            at(0.0, 0.3, ThrustCommand::Thrust(Force::new::<newton>(-10.0))),
        ];
        let report = engine.compute_flight_points(&mut points);

        let failed: Vec<usize> = report.failures.iter().map(|f| f.index).collect();
        assert_eq!(failed, [1, 2]);
        assert!(points[0].thrust.get::<newton>() > 0.0);
        for point in &points[1..] {
            assert_relative_eq!(point.thrust.get::<newton>(), 0.0);
            assert_relative_eq!(point.sfc, 0.0);
        }
    }

    #[test]
    fn weight_and_drag() {
        let engine = reference_engine();
        assert_relative_eq!(engine.compute_weight().get::<pound>(), 449.006, epsilon = 1e-2);
        assert_relative_eq!(engine.compute_drag(0.5, 5.0e6, 2.1), 0.0);
    }

    #[test]
    fn low_rating_keeps_max_thrust_within_max_power() {
        let mut spec = reference_spec();
        spec.ratings.idle = gaprop_core::constraint::UnitInterval::new(0.05).unwrap();
        spec.ratings.descent = gaprop_core::constraint::UnitInterval::new(0.0).unwrap();
        let engine = BasicTurboprop::new(spec, reference_engine().propeller().clone()).unwrap();

        let point =
            FlightPoint::with_rate(Length::new::<meter>(0.0), 0.3, EngineSetting::Idle, 1.0);
        let limits = engine.compute_limits(&point).unwrap();
        let speed = engine.generator().cycle.flight_condition(0.0, 0.3).speed;
        let required = engine
            .propeller()
            .required_power(limits.max_thrust.get::<newton>(), speed, 0.0)
            .unwrap();
        assert_relative_eq!(required, limits.max_power.get::<watt>(), max_relative = 1e-3);

        let descent =
            FlightPoint::with_rate(Length::new::<meter>(0.0), 0.3, EngineSetting::Descent, 0.5);
        let limits = engine.compute_limits(&descent).unwrap();
        assert_relative_eq!(limits.max_power.get::<watt>(), 0.0);
        assert_relative_eq!(limits.max_thrust.get::<newton>(), 0.0);
    }

    #[test]
    fn derated_setting_scales_available_power() {
        let mut spec = reference_spec();
        spec.ratings.climb = gaprop_core::constraint::UnitInterval::new(0.9).unwrap();
        let engine = BasicTurboprop::new(spec, reference_engine().propeller().clone()).unwrap();

        let climb = engine
            .max_power_at(Length::new::<meter>(0.0), 0.3, EngineSetting::Climb)
            .unwrap();
        let takeoff = engine
            .max_power_at(Length::new::<meter>(0.0), 0.3, EngineSetting::Takeoff)
            .unwrap();
        assert_relative_eq!(climb.get::<watt>(), 0.9 * takeoff.get::<watt>(), max_relative = 1e-12);
    }
}
