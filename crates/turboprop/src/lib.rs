//! A basic turboprop performance model.
//!
//! A [`BasicTurboprop`] is built from an [`EngineDesignSpec`] and a
//! [`PropellerMap`]. Construction sizes the gas generator at its design point
//! (core mass flow and the HP turbine, power turbine and nozzle areas) and
//! those sizes stay fixed. Off-design evaluation then matches the cycle to the
//! fixed areas for each flight point:
//!
//! - [`BasicTurboprop::compute_limits`]: maximum shaft power and thrust, with
//!   the ITT, OPR or flat power [`Limit`] that sets them
//! - [`BasicTurboprop::compute_flight_point`]: thrust and SFC for a thrust rate
//!   or a regulated thrust
//! - [`Propulsion::compute_weight`] and [`BasicTurboprop::compute_dimensions`]:
//!   empirical weight and nacelle size
//!
//! Engines are usually described in TOML and loaded through [`EngineConfig`]:
//!
//! ```no_run
//! use gaprop_turboprop::{EngineConfig, EngineSetting, FlightPoint};
//! use uom::si::{f64::Length, force::newton, length::meter};
//!
//! let engine = EngineConfig::from_path("engine.toml")?.build()?;
//!
//! let mut point = FlightPoint::with_rate(Length::new::<meter>(3000.0), 0.4, EngineSetting::Climb, 0.8);
//! engine.compute_flight_point(&mut point)?;
//! println!("{:.0} N, SFC {:.3e} kg/(N s)", point.thrust.get::<newton>(), point.sfc);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod cycle;
mod design;
mod dimensions;
mod engine;
mod engine_set;
mod error;
mod flight_point;
pub mod jacobian;
mod limits;
mod mass;
mod propeller;
mod root;
mod setting;

#[cfg(test)]
mod test_utils;

pub use config::{
    ConfigError, DesignConfig, EfficienciesConfig, EngineConfig, InstallationConfig,
    LimitsConfig, PropellerConfig, RatingsConfig, TableConfig,
};
pub use cycle::Sizing;
pub use design::{
    DesignPoint, Efficiencies, EngineDesignSpec, Fraction, Installation, OperatingLimits, Ratings,
};
pub use dimensions::NacelleDimensions;
pub use engine::{BasicTurboprop, Propulsion};
pub use engine_set::EngineSet;
pub use error::EngineError;
pub use flight_point::{BatchReport, FlightPoint, FlightPointBatch, PointFailure, ThrustCommand};
pub use limits::{EngineLimits, Limit};
pub use mass::uninstalled_weight;
pub use propeller::{PerformanceTable, PropellerMap};
pub use setting::{EngineSetting, PropellerLayout};
