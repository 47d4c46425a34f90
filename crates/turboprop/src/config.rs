//! TOML engine descriptions.
//!
//! Powers are given in kW, temperatures in K, altitudes in m, speeds in m/s,
//! thrusts in N and heating values in J/kg.

use std::path::Path;

use gaprop_core::constraint::{Constrained, StrictlyPositive, UnitInterval};
use ndarray::{Array1, Array2};
use serde::Deserialize;
use thiserror::Error;
use uom::si::{
    f64::{Length, Power, ThermodynamicTemperature},
    length::meter,
    power::kilowatt,
    thermodynamic_temperature::kelvin,
};

use crate::{
    BasicTurboprop, EngineError, PropellerLayout,
    design::{
        DesignPoint, Efficiencies, EngineDesignSpec, Fraction, Installation, OperatingLimits,
        Ratings,
    },
    propeller::{PerformanceTable, PropellerMap},
};

/// Errors raised while loading an engine description.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read engine file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse engine TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesignConfig {
    /// kW
    pub power: f64,
    pub turbine_inlet_temperature: f64,
    pub overall_pressure_ratio: f64,
    pub altitude: f64,
    pub mach: f64,
    pub exhaust_mach: f64,
    pub first_stage_pressure_ratio_fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallationConfig {
    pub propeller_layout: i64,
    pub bleed_control: f64,
    pub inter_compressor_bleed: f64,
    pub turbine_cooling_fraction: f64,
    /// kW
    pub hp_shaft_power_offtake: f64,
    pub gearbox_efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    pub itt: f64,
    /// kW
    pub power: f64,
    pub opr: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EfficienciesConfig {
    pub lp_compressor: f64,
    pub hp_compressor: f64,
    pub hp_turbine: f64,
    pub power_turbine: f64,
    pub mechanical: f64,
    pub inlet_ram_recovery: f64,
    pub combustor_pressure_ratio: f64,
    pub combustion: f64,
    pub fuel_heating_value: f64,
}

/// Per-setting power ratings; missing entries are 1.0.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RatingsConfig {
    #[serde(default = "full_rating")]
    pub takeoff: f64,
    #[serde(default = "full_rating")]
    pub climb: f64,
    #[serde(default = "full_rating")]
    pub cruise: f64,
    #[serde(default = "full_rating")]
    pub idle: f64,
    #[serde(default = "full_rating")]
    pub descent: f64,
}

fn full_rating() -> f64 {
    1.0
}

impl Default for RatingsConfig {
    fn default() -> Self {
        Self {
            takeoff: 1.0,
            climb: 1.0,
            cruise: 1.0,
            idle: 1.0,
            descent: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    pub speed: Vec<f64>,
    pub thrust: Vec<f64>,
    pub thrust_limit: Vec<f64>,
    /// One row per speed, one column per thrust.
    pub efficiency: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropellerConfig {
    pub cruise_altitude: f64,
    pub effective_advance_ratio: f64,
    pub installed_efficiency_sea_level: f64,
    pub installed_efficiency_cruise: f64,
    pub sea_level: TableConfig,
    pub cruise: TableConfig,
}

/// A complete engine description.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    pub design: DesignConfig,
    pub installation: InstallationConfig,
    pub limits: LimitsConfig,
    pub efficiencies: EfficienciesConfig,
    #[serde(default)]
    pub ratings: RatingsConfig,
    pub propeller: PropellerConfig,
}

impl EngineConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid engine description.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is not a valid engine description.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Converts the description into a typed design spec.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] naming the first value that
    /// violates its constraint, or [`EngineError::UnknownLayout`].
    pub fn design_spec(&self) -> Result<EngineDesignSpec, EngineError> {
        let d = &self.design;
        let i = &self.installation;
        let l = &self.limits;
        let e = &self.efficiencies;
        let r = &self.ratings;

        Ok(EngineDesignSpec {
            design: DesignPoint {
                power: Power::new::<kilowatt>(d.power),
                turbine_inlet_temperature: ThermodynamicTemperature::new::<kelvin>(
                    d.turbine_inlet_temperature,
                ),
                overall_pressure_ratio: positive("design.overall_pressure_ratio", d.overall_pressure_ratio)?,
                altitude: Length::new::<meter>(d.altitude),
                mach: d.mach,
                exhaust_mach: positive("design.exhaust_mach", d.exhaust_mach)?,
                first_stage_pressure_ratio_fraction: fraction(
                    "design.first_stage_pressure_ratio_fraction",
                    d.first_stage_pressure_ratio_fraction,
                )?,
            },
            installation: Installation {
                propeller_layout: PropellerLayout::try_from(i.propeller_layout)?,
                bleed_control: fraction("installation.bleed_control", i.bleed_control)?,
                inter_compressor_bleed: fraction(
                    "installation.inter_compressor_bleed",
                    i.inter_compressor_bleed,
                )?,
                turbine_cooling_fraction: fraction(
                    "installation.turbine_cooling_fraction",
                    i.turbine_cooling_fraction,
                )?,
                hp_shaft_power_offtake: Power::new::<kilowatt>(i.hp_shaft_power_offtake),
                gearbox_efficiency: fraction("installation.gearbox_efficiency", i.gearbox_efficiency)?,
            },
            limits: OperatingLimits {
                itt: ThermodynamicTemperature::new::<kelvin>(l.itt),
                power: Power::new::<kilowatt>(l.power),
                opr: positive("limits.opr", l.opr)?,
            },
            efficiencies: Efficiencies {
                lp_compressor: fraction("efficiencies.lp_compressor", e.lp_compressor)?,
                hp_compressor: fraction("efficiencies.hp_compressor", e.hp_compressor)?,
                hp_turbine: fraction("efficiencies.hp_turbine", e.hp_turbine)?,
                power_turbine: fraction("efficiencies.power_turbine", e.power_turbine)?,
                mechanical: fraction("efficiencies.mechanical", e.mechanical)?,
                inlet_ram_recovery: fraction("efficiencies.inlet_ram_recovery", e.inlet_ram_recovery)?,
                combustor_pressure_ratio: fraction(
                    "efficiencies.combustor_pressure_ratio",
                    e.combustor_pressure_ratio,
                )?,
                combustion: fraction("efficiencies.combustion", e.combustion)?,
                fuel_heating_value: positive("efficiencies.fuel_heating_value", e.fuel_heating_value)?,
            },
            ratings: Ratings {
                takeoff: fraction("ratings.takeoff", r.takeoff)?,
                climb: fraction("ratings.climb", r.climb)?,
                cruise: fraction("ratings.cruise", r.cruise)?,
                idle: fraction("ratings.idle", r.idle)?,
                descent: fraction("ratings.descent", r.descent)?,
            },
        })
    }

    /// Builds the propeller map from the two tables.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Table`] for malformed tables or
    /// [`EngineError::InvalidParameter`] for invalid corrections.
    pub fn propeller_map(&self) -> Result<PropellerMap, EngineError> {
        let p = &self.propeller;
        Ok(PropellerMap {
            sea_level: table("sea_level", &p.sea_level)?,
            cruise: table("cruise", &p.cruise)?,
            cruise_altitude: positive("propeller.cruise_altitude", p.cruise_altitude)?,
            effective_advance_ratio: positive(
                "propeller.effective_advance_ratio",
                p.effective_advance_ratio,
            )?,
            installed_efficiency_sea_level: fraction(
                "propeller.installed_efficiency_sea_level",
                p.installed_efficiency_sea_level,
            )?,
            installed_efficiency_cruise: fraction(
                "propeller.installed_efficiency_cruise",
                p.installed_efficiency_cruise,
            )?,
        })
    }

    /// Builds and sizes the engine.
    ///
    /// # Errors
    ///
    /// Returns any error from [`EngineConfig::design_spec`],
    /// [`EngineConfig::propeller_map`] or [`BasicTurboprop::new`].
    pub fn build(&self) -> Result<BasicTurboprop, EngineError> {
        BasicTurboprop::new(self.design_spec()?, self.propeller_map()?)
    }
}

fn fraction(name: &'static str, value: f64) -> Result<Fraction, EngineError> {
    UnitInterval::new(value).map_err(EngineError::constraint(name))
}

fn positive(name: &'static str, value: f64) -> Result<Constrained<f64, StrictlyPositive>, EngineError> {
    StrictlyPositive::new(value).map_err(EngineError::constraint(name))
}

fn table(name: &'static str, config: &TableConfig) -> Result<PerformanceTable, EngineError> {
    let rows = config.efficiency.len();
    let columns = config.efficiency.first().map_or(0, Vec::len);
    if let Some(row) = config.efficiency.iter().position(|r| r.len() != columns) {
        return Err(EngineError::Table {
            table: name,
            reason: format!("efficiency row {row} has a different length than row 0"),
        });
    }

    let values: Vec<f64> = config.efficiency.iter().flatten().copied().collect();
    let efficiency = Array2::from_shape_vec((rows, columns), values).map_err(|e| EngineError::Table {
        table: name,
        reason: e.to_string(),
    })?;

    PerformanceTable::new(
        name,
        Array1::from(config.speed.clone()),
        Array1::from(config.thrust.clone()),
        Array1::from(config.thrust_limit.clone()),
        efficiency,
    )
}
