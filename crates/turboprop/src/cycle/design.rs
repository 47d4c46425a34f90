use uom::si::{
    area::square_meter,
    f64::{Area, MassRate},
    length::meter,
    mass_rate::kilogram_per_second,
    power::watt,
    thermodynamic_temperature::kelvin,
};

use crate::{EngineDesignSpec, EngineError, root};

use super::{Cycle, CycleError, GAS};

/// Core mass flow bracket searched at the design point (kg/s).
const CORE_FLOW_BRACKET: [f64; 2] = [1e-3, 1e3];

/// Engine dimensions fixed by the design point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sizing {
    pub(crate) core_mass_flow: f64,
    pub(crate) a41: f64,
    pub(crate) a45: f64,
    pub(crate) a8: f64,
}

impl Sizing {
    /// Compressor face mass flow at the design point.
    #[must_use]
    pub fn core_mass_flow(&self) -> MassRate {
        MassRate::new::<kilogram_per_second>(self.core_mass_flow)
    }

    /// Choked HP turbine throat area.
    #[must_use]
    pub fn hp_turbine_area(&self) -> Area {
        Area::new::<square_meter>(self.a41)
    }

    /// Choked power turbine inlet area.
    #[must_use]
    pub fn power_turbine_area(&self) -> Area {
        Area::new::<square_meter>(self.a45)
    }

    /// Exhaust nozzle exit area.
    #[must_use]
    pub fn nozzle_area(&self) -> Area {
        Area::new::<square_meter>(self.a8)
    }

    /// Sizes the engine so the power turbine delivers the design power at the
    /// design flight condition.
    pub(crate) fn at_design(cycle: &Cycle, spec: &EngineDesignSpec) -> Result<Self, EngineError> {
        let d = &spec.design;
        let condition = cycle.flight_condition(d.altitude.get::<meter>(), d.mach);
        let pressure_ratio = d.overall_pressure_ratio.get();
        let t41 = d.turbine_inlet_temperature.get::<kelvin>();
        let power = d.power.get::<watt>();
        let exhaust_mach = d.exhaust_mach.get();
        let pt5 = condition.p0 * GAS.total_pressure_ratio(exhaust_mach);

        let power_balance = |m2: f64| -> Result<f64, CycleError> {
            let core = cycle.gas_generator(m2, &condition, pressure_ratio, t41)?;
            let tt5 = cycle.power_turbine_exit(core.tt45, core.pt45, pt5)?;
            Ok(cycle.turbine_shaft_power(core.m45, core.tt45, tt5) - power)
        };

        let m2 =
            root::solve_failures_negative("design core mass flow", CORE_FLOW_BRACKET, power_balance)
                .map_err(|e| {
                    EngineError::ImpossibleGeometry(format!(
                        "no core mass flow delivers {power} W at the design point ({e})"
                    ))
                })?;

        let core = cycle
            .gas_generator(m2, &condition, pressure_ratio, t41)
            .map_err(|e| EngineError::ImpossibleGeometry(e.to_string()))?;
        let tt5 = cycle
            .power_turbine_exit(core.tt45, core.pt45, pt5)
            .map_err(|e| EngineError::ImpossibleGeometry(e.to_string()))?;

        let choked = GAS.choked_flow_parameter();
        let sizing = Self {
            core_mass_flow: m2,
            a41: core.m41 * t41.sqrt() / (core.pt41 * choked),
            a45: core.m45 * core.tt45.sqrt() / (core.pt45 * choked),
            a8: core.m45 * tt5.sqrt() / (pt5 * GAS.mass_flow_parameter(exhaust_mach)),
        };

        for (name, area) in [("A41", sizing.a41), ("A45", sizing.a45), ("A8", sizing.a8)] {
            if !(area.is_finite() && area > 0.0) {
                return Err(EngineError::ImpossibleGeometry(format!(
                    "{name} area is not physical ({area} m²)"
                )));
            }
        }

        Ok(sizing)
    }
}
