//! Design-time parameters of a turboprop.
//!
//! Fractions and efficiencies are [`Constrained`] at construction, so the
//! remaining checks in [`EngineDesignSpec::validate`] are the ones that relate
//! several fields or need strict positivity of a dimensional quantity.

use gaprop_core::constraint::{Constrained, StrictlyPositive, UnitInterval};
use uom::si::{
    f64::{Length, Power, ThermodynamicTemperature},
    length::meter,
    power::watt,
    thermodynamic_temperature::kelvin,
};

use crate::{EngineError, EngineSetting, PropellerLayout};

/// Fraction or efficiency in `[0, 1]`.
pub type Fraction = Constrained<f64, UnitInterval>;

/// Design flight condition and cycle parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignPoint {
    /// Power-turbine shaft power at the design point.
    pub power: Power,
    /// Turbine entry total temperature (T41).
    pub turbine_inlet_temperature: ThermodynamicTemperature,
    /// Compressor pressure ratio.
    pub overall_pressure_ratio: Constrained<f64, StrictlyPositive>,
    pub altitude: Length,
    pub mach: f64,
    /// Exhaust nozzle exit Mach number.
    pub exhaust_mach: Constrained<f64, StrictlyPositive>,
    /// LP compressor ratio as a fraction of the overall ratio.
    pub first_stage_pressure_ratio_fraction: Fraction,
}

/// Installation effects on the core and the shaft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Installation {
    pub propeller_layout: PropellerLayout,
    /// Scales the inter-compressor bleed.
    pub bleed_control: Fraction,
    /// Air bled between the LP and HP compressors, as a fraction of core flow.
    pub inter_compressor_bleed: Fraction,
    /// HP compressor delivery air bypassing the HP turbine for cooling.
    pub turbine_cooling_fraction: Fraction,
    /// Accessory power drawn from the gas generator shaft.
    pub hp_shaft_power_offtake: Power,
    pub gearbox_efficiency: Fraction,
}

/// Operating limits applied at every flight point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingLimits {
    /// Maximum power-turbine inlet temperature (Tt45).
    pub itt: ThermodynamicTemperature,
    /// Flat-rated propeller shaft power.
    pub power: Power,
    /// Maximum overall pressure ratio.
    pub opr: Constrained<f64, StrictlyPositive>,
}

/// Component efficiencies and loss coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Efficiencies {
    pub lp_compressor: Fraction,
    pub hp_compressor: Fraction,
    pub hp_turbine: Fraction,
    pub power_turbine: Fraction,
    /// Shaft mechanical efficiency.
    pub mechanical: Fraction,
    /// Fraction of the free-stream dynamic head recovered by the inlet.
    pub inlet_ram_recovery: Fraction,
    /// Burner total pressure ratio.
    pub combustor_pressure_ratio: Fraction,
    pub combustion: Fraction,
    /// Fuel lower heating value (J/kg).
    pub fuel_heating_value: Constrained<f64, StrictlyPositive>,
}

/// Power multiplier per engine setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratings {
    pub takeoff: Fraction,
    pub climb: Fraction,
    pub cruise: Fraction,
    pub idle: Fraction,
    pub descent: Fraction,
}

impl Ratings {
    /// Rating applied to the available power in `setting`.
    #[must_use]
    pub fn for_setting(&self, setting: EngineSetting) -> f64 {
        match setting {
            EngineSetting::Takeoff => self.takeoff,
            EngineSetting::Climb => self.climb,
            EngineSetting::Cruise => self.cruise,
            EngineSetting::Idle => self.idle,
            EngineSetting::Descent => self.descent,
        }
        .get()
    }
}

impl Default for Ratings {
    fn default() -> Self {
        let full = UnitInterval::one();
        Self {
            takeoff: full,
            climb: full,
            cruise: full,
            idle: full,
            descent: full,
        }
    }
}

/// Everything needed to size a turboprop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineDesignSpec {
    pub design: DesignPoint,
    pub installation: Installation,
    pub limits: OperatingLimits,
    pub efficiencies: Efficiencies,
    pub ratings: Ratings,
}

impl EngineDesignSpec {
    /// Checks the relations between parameters that the field types cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<(), EngineError> {
        let d = &self.design;
        positive("design.power", d.power.get::<watt>())?;
        positive(
            "design.turbine_inlet_temperature",
            d.turbine_inlet_temperature.get::<kelvin>(),
        )?;
        finite("design.altitude", d.altitude.get::<meter>())?;
        if !(d.mach.is_finite() && d.mach >= 0.0) {
            return Err(EngineError::invalid("design.mach", "must be finite and >= 0"));
        }
        if d.overall_pressure_ratio.get() <= 1.0 {
            return Err(EngineError::invalid(
                "design.overall_pressure_ratio",
                "must be greater than one",
            ));
        }

        let offtake = self.installation.hp_shaft_power_offtake.get::<watt>();
        if !(offtake.is_finite() && offtake >= 0.0) {
            return Err(EngineError::invalid(
                "installation.hp_shaft_power_offtake",
                "must be finite and >= 0",
            ));
        }

        positive("limits.itt", self.limits.itt.get::<kelvin>())?;
        positive("limits.power", self.limits.power.get::<watt>())?;

        let e = &self.efficiencies;
        for (name, eta) in [
            ("efficiencies.lp_compressor", e.lp_compressor),
            ("efficiencies.hp_compressor", e.hp_compressor),
            ("efficiencies.hp_turbine", e.hp_turbine),
            ("efficiencies.mechanical", e.mechanical),
            ("efficiencies.combustion", e.combustion),
            ("efficiencies.combustor_pressure_ratio", e.combustor_pressure_ratio),
            ("installation.gearbox_efficiency", self.installation.gearbox_efficiency),
        ] {
            positive(name, eta.get())?;
        }

        Ok(())
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::invalid(name, "must be finite"))
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::invalid(name, "must be finite and greater than zero"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::test_utils::reference_spec;

    #[test]
    fn reference_spec_is_valid() {
        assert!(reference_spec().validate().is_ok());
    }

    #[test]
    fn default_ratings_are_unity() {
        let ratings = Ratings::default();
        for setting in EngineSetting::ALL {
            assert!((ratings.for_setting(setting) - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn rejects_unit_pressure_ratio() {
        let mut spec = reference_spec();
        spec.design.overall_pressure_ratio = StrictlyPositive::new(1.0).unwrap();

        match spec.validate() {
            Err(EngineError::InvalidParameter { name, .. }) => {
                assert_eq!(name, "design.overall_pressure_ratio");
            }
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_compressor_efficiency() {
        let mut spec = reference_spec();
        spec.efficiencies.hp_compressor = UnitInterval::new(0.0).unwrap();

        assert!(matches!(
            spec.validate(),
            Err(EngineError::InvalidParameter {
                name: "efficiencies.hp_compressor",
                ..
            })
        ));
    }
}
