//! Compressor and turbine relations on total conditions.
//!
//! Both devices are described by an isentropic efficiency in `[0, 1]`.
//! Temperatures are total temperatures in K and pressure ratios are always
//! written outlet over inlet.

mod compressor;
mod turbine;

pub use compressor::{CompressionError, compressor_exit_temperature};
pub use turbine::{ExpansionError, turbine_exit_temperature, turbine_pressure_ratio};
