//! Components shared by gaprop engine models.
//!
//! - [`interpolation`]: gridded 1-D and 2-D interpolation backed by `ninterp`
//! - [`atmosphere`]: International Standard Atmosphere
//! - [`gas`]: perfect-gas relations for compressible flow
//! - [`turbomachinery`]: compressor and turbine relations with isentropic efficiencies

pub mod atmosphere;
pub mod gas;
pub mod interpolation;
pub mod turbomachinery;
