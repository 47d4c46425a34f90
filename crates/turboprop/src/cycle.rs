//! Gas generator cycle.
//!
//! Station numbering follows the usual turboprop convention:
//!
//! | station | location |
//! |---|---|
//! | 0 | free stream |
//! | 2 | LP compressor face |
//! | 25 | LP compressor exit, inter-compressor bleed taken here |
//! | 3 | HP compressor exit, cooling air taken here |
//! | 41 | HP turbine throat |
//! | 45 | power turbine inlet, after cooling air is mixed back |
//! | 5 | power turbine exit |
//! | 8 | nozzle exit |
//!
//! All quantities inside this module are plain SI `f64`.

mod design;
mod off_design;

pub use design::Sizing;
pub(crate) use off_design::{GasGenerator, OperatingPoint};

use gaprop_components::{
    atmosphere::Atmosphere,
    gas::PerfectGas,
    turbomachinery::{
        CompressionError, ExpansionError, compressor_exit_temperature, turbine_exit_temperature,
        turbine_pressure_ratio,
    },
};
use thiserror::Error;
use uom::si::{
    f64::Length, length::meter, power::watt, pressure::pascal, thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::{EngineDesignSpec, EngineError, design::Fraction};

const AIR: PerfectGas = PerfectGas::AIR;
const GAS: PerfectGas = PerfectGas::COMBUSTION_PRODUCTS;

/// Ambient and inlet conditions at one flight point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FlightCondition {
    pub altitude: f64,
    pub mach: f64,
    pub p0: f64,
    /// Free-stream total pressure.
    pub pt0: f64,
    pub tt2: f64,
    pub pt2: f64,
    /// True airspeed (m/s).
    pub speed: f64,
}

impl FlightCondition {
    pub(crate) fn new(altitude: f64, mach: f64, ram_recovery: f64) -> Self {
        let atm = Atmosphere::isa(Length::new::<meter>(altitude));
        let t0 = atm.temperature().get::<kelvin>();
        let p0 = atm.pressure().get::<pascal>();

        let dynamic = 0.5 * (AIR.gamma - 1.0) * mach * mach;
        let pressure_exponent = 1.0 / AIR.isentropic_exponent();

        Self {
            altitude,
            mach,
            p0,
            pt0: p0 * AIR.total_pressure_ratio(mach),
            tt2: t0 * AIR.total_temperature_ratio(mach),
            pt2: p0 * (1.0 + ram_recovery * dynamic).powf(pressure_exponent),
            speed: atm.true_airspeed(mach).get::<meter_per_second>(),
        }
    }

    pub(crate) fn no_operating_point(&self, t41: f64) -> EngineError {
        EngineError::NoOperatingPoint {
            altitude: self.altitude,
            mach: self.mach,
            t41,
        }
    }
}

/// Reasons a cycle evaluation has no physical solution.
#[derive(Debug, Error)]
pub(crate) enum CycleError {
    #[error("fuel-air ratio {0} is not positive")]
    LeanLimit(f64),

    #[error(transparent)]
    Compression(#[from] CompressionError),

    #[error(transparent)]
    Expansion(#[from] ExpansionError),
}

/// Core flow state downstream of the burner.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CoreState {
    pub fuel_flow: f64,
    pub m41: f64,
    pub m45: f64,
    pub pt41: f64,
    pub pt45: f64,
    pub tt45: f64,
}

/// Fixed cycle coefficients derived from the design spec.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cycle {
    lp_compressor: Fraction,
    hp_compressor: Fraction,
    hp_turbine: Fraction,
    power_turbine: Fraction,
    mechanical: f64,
    gearbox: f64,
    bleed: f64,
    cooling: f64,
    offtake: f64,
    burner_pressure_ratio: f64,
    /// Heat released per kg of fuel (J/kg).
    fuel_energy: f64,
    ram_recovery: f64,
    /// LP share of the compression, as `ln(π_LP) / ln(π)`.
    split: f64,
}

impl Cycle {
    pub(crate) fn from_spec(spec: &EngineDesignSpec) -> Result<Self, EngineError> {
        let opr = spec.design.overall_pressure_ratio.get();
        let lp_ratio = spec.design.first_stage_pressure_ratio_fraction.get() * opr;
        if !(lp_ratio > 1.0 && lp_ratio < opr) {
            return Err(EngineError::ImpossibleGeometry(format!(
                "LP compressor ratio {lp_ratio} must lie strictly between 1 and {opr}"
            )));
        }

        let e = &spec.efficiencies;
        let i = &spec.installation;
        Ok(Self {
            lp_compressor: e.lp_compressor,
            hp_compressor: e.hp_compressor,
            hp_turbine: e.hp_turbine,
            power_turbine: e.power_turbine,
            mechanical: e.mechanical.get(),
            gearbox: i.gearbox_efficiency.get(),
            bleed: i.bleed_control.get() * i.inter_compressor_bleed.get(),
            cooling: i.turbine_cooling_fraction.get(),
            offtake: i.hp_shaft_power_offtake.get::<watt>(),
            burner_pressure_ratio: e.combustor_pressure_ratio.get(),
            fuel_energy: e.fuel_heating_value.get() * e.combustion.get(),
            ram_recovery: e.inlet_ram_recovery.get(),
            split: lp_ratio.ln() / opr.ln(),
        })
    }

    pub(crate) fn flight_condition(&self, altitude: f64, mach: f64) -> FlightCondition {
        FlightCondition::new(altitude, mach, self.ram_recovery)
    }

    /// LP and HP compressor exit temperatures (Tt25, Tt3).
    fn compress(&self, tt2: f64, pressure_ratio: f64) -> Result<(f64, f64), CycleError> {
        let lp_ratio = pressure_ratio.powf(self.split);
        let hp_ratio = pressure_ratio / lp_ratio;
        let tt25 = compressor_exit_temperature(tt2, lp_ratio, self.lp_compressor, &AIR)?;
        let tt3 = compressor_exit_temperature(tt25, hp_ratio, self.hp_compressor, &AIR)?;
        Ok((tt25, tt3))
    }

    fn fuel_air_ratio(&self, tt3: f64, t41: f64) -> Result<f64, CycleError> {
        let far = (GAS.cp() * t41 - AIR.cp() * tt3) / (self.fuel_energy - GAS.cp() * t41);
        if far > 0.0 {
            Ok(far)
        } else {
            Err(CycleError::LeanLimit(far))
        }
    }

    /// Fuel-air ratio needed to reach `t41` at compressor ratio `pressure_ratio`.
    pub(crate) fn burner_fuel_air_ratio(
        &self,
        tt2: f64,
        pressure_ratio: f64,
        t41: f64,
    ) -> Result<f64, CycleError> {
        let (_, tt3) = self.compress(tt2, pressure_ratio)?;
        self.fuel_air_ratio(tt3, t41)
    }

    /// Core flows from the LP compressor face flow `m2`.
    ///
    /// Returns `(m25, cooling flow, m3)`.
    fn split_flows(&self, m2: f64) -> (f64, f64, f64) {
        let m25 = m2 * (1.0 - self.bleed);
        let cooling = self.cooling * m25;
        (m25, cooling, m25 - cooling)
    }

    /// Compressor face flow that passes `m41` through the turbine throat.
    pub(crate) fn face_flow(&self, m41: f64, far: f64) -> f64 {
        m41 / ((1.0 + far) * (1.0 - self.cooling) * (1.0 - self.bleed))
    }

    /// Runs the gas generator from the compressor face to the power turbine inlet.
    pub(crate) fn gas_generator(
        &self,
        m2: f64,
        condition: &FlightCondition,
        pressure_ratio: f64,
        t41: f64,
    ) -> Result<CoreState, CycleError> {
        let tt2 = condition.tt2;
        let (tt25, tt3) = self.compress(tt2, pressure_ratio)?;
        let far = self.fuel_air_ratio(tt3, t41)?;

        let (m25, cooling, m3) = self.split_flows(m2);
        let fuel_flow = m3 * far;
        let m41 = m3 + fuel_flow;
        let m45 = m41 + cooling;

        let work = m2 * AIR.cp() * (tt25 - tt2) + m25 * AIR.cp() * (tt3 - tt25) + self.offtake;
        let tt44 = t41 - work / (m41 * GAS.cp() * self.mechanical);
        let hp_ratio = turbine_pressure_ratio(t41, tt44, self.hp_turbine, &GAS)?;

        let pt41 = condition.pt2 * pressure_ratio * self.burner_pressure_ratio;
        let tt45 = (m41 * GAS.cp() * tt44 + cooling * AIR.cp() * tt3) / (m45 * GAS.cp());

        Ok(CoreState {
            fuel_flow,
            m41,
            m45,
            pt41,
            pt45: pt41 * hp_ratio,
            tt45,
        })
    }

    /// Power turbine exit temperature for an expansion from `pt45` to `pt5`.
    pub(crate) fn power_turbine_exit(&self, tt45: f64, pt45: f64, pt5: f64) -> Result<f64, CycleError> {
        Ok(turbine_exit_temperature(tt45, pt5 / pt45, self.power_turbine, &GAS)?)
    }

    /// Power turbine shaft power before the gearbox (W).
    pub(crate) fn turbine_shaft_power(&self, m45: f64, tt45: f64, tt5: f64) -> f64 {
        m45 * GAS.cp() * (tt45 - tt5) * self.mechanical
    }

    /// Shaft power delivered to the propeller (W).
    pub(crate) fn delivered_power(&self, turbine_shaft_power: f64) -> f64 {
        turbine_shaft_power * self.gearbox
    }
}
