//! International Standard Atmosphere.
//!
//! Layers are defined by their base altitude, base temperature and lapse rate.
//! Base pressures follow from integrating the hydrostatic equation upward from
//! sea level, so the pressure profile is continuous across layer boundaries.
//! Altitudes below sea level extend the troposphere and altitudes above the
//! last tabulated layer extend that layer.

use uom::si::{
    f64::{Length, Pressure, ThermodynamicTemperature, Velocity},
    length::meter,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::gas::PerfectGas;

/// Standard gravitational acceleration (m/s²).
const G0: f64 = 9.80665;
const SEA_LEVEL_TEMPERATURE: f64 = 288.15;
const SEA_LEVEL_PRESSURE: f64 = 101_325.0;

#[derive(Debug, Clone, Copy)]
struct Layer {
    /// Base geopotential altitude (m).
    base_altitude: f64,
    /// Temperature at the layer base (K).
    base_temperature: f64,
    /// Temperature gradient (K/m).
    lapse_rate: f64,
}

const LAYERS: [Layer; 3] = [
    // Troposphere
    Layer {
        base_altitude: 0.0,
        base_temperature: SEA_LEVEL_TEMPERATURE,
        lapse_rate: -0.0065,
    },
    // Tropopause
    Layer {
        base_altitude: 11_000.0,
        base_temperature: 216.65,
        lapse_rate: 0.0,
    },
    // Lower stratosphere
    Layer {
        base_altitude: 20_000.0,
        base_temperature: 216.65,
        lapse_rate: 0.001,
    },
];

impl Layer {
    /// Static temperature and pressure at `altitude` given the base pressure.
    fn state(&self, altitude: f64, base_pressure: f64) -> (f64, f64) {
        let r = PerfectGas::AIR.gas_constant;
        let dh = altitude - self.base_altitude;
        let temperature = self.base_temperature + self.lapse_rate * dh;

        let pressure = if self.lapse_rate.abs() < 1e-12 {
            base_pressure * (-G0 * dh / (r * self.base_temperature)).exp()
        } else {
            base_pressure
                * (temperature / self.base_temperature).powf(-G0 / (self.lapse_rate * r))
        };

        (temperature, pressure)
    }
}

/// Ambient static conditions at an altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    temperature: f64,
    pressure: f64,
}

impl Atmosphere {
    /// Standard-day conditions at the given geopotential altitude.
    #[must_use]
    pub fn isa(altitude: Length) -> Self {
        let h = altitude.get::<meter>();

        let mut base_pressure = SEA_LEVEL_PRESSURE;
        let mut layer = LAYERS[0];
        for next in &LAYERS[1..] {
            if h < next.base_altitude {
                break;
            }
            base_pressure = layer.state(next.base_altitude, base_pressure).1;
            layer = *next;
        }

        let (temperature, pressure) = layer.state(h, base_pressure);
        Self {
            temperature,
            pressure,
        }
    }

    #[must_use]
    pub fn temperature(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(self.temperature)
    }

    #[must_use]
    pub fn pressure(&self) -> Pressure {
        Pressure::new::<pascal>(self.pressure)
    }

    #[must_use]
    pub fn speed_of_sound(&self) -> Velocity {
        Velocity::new::<meter_per_second>(PerfectGas::AIR.speed_of_sound(self.temperature))
    }

    /// Flight speed for a Mach number in these conditions.
    #[must_use]
    pub fn true_airspeed(&self, mach: f64) -> Velocity {
        self.speed_of_sound() * mach
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn at(h: f64) -> Atmosphere {
        Atmosphere::isa(Length::new::<meter>(h))
    }

    #[test]
    fn sea_level_values() {
        let atm = at(0.0);
        assert_relative_eq!(atm.temperature().get::<kelvin>(), 288.15);
        assert_relative_eq!(atm.pressure().get::<pascal>(), 101_325.0);
        assert_relative_eq!(
            atm.speed_of_sound().get::<meter_per_second>(),
            340.29,
            max_relative = 1e-4
        );
    }

    #[test]
    fn tropopause_is_continuous() {
        let below = at(10_999.999);
        let above = at(11_000.001);
        assert_relative_eq!(
            below.pressure().get::<pascal>(),
            above.pressure().get::<pascal>(),
            max_relative = 1e-6
        );
        assert_relative_eq!(above.temperature().get::<kelvin>(), 216.65);
        assert_relative_eq!(above.pressure().get::<pascal>(), 22_632.0, max_relative = 1e-4);
    }

    #[test]
    fn stratosphere_is_isothermal_then_warms() {
        assert_relative_eq!(at(15_000.0).temperature().get::<kelvin>(), 216.65);
        assert_relative_eq!(at(25_000.0).temperature().get::<kelvin>(), 221.65, epsilon = 1e-9);
        assert!(at(25_000.0).pressure() < at(20_000.0).pressure());
    }

    #[test]
    fn negative_altitude_extends_troposphere() {
        let atm = at(-300.0);
        assert_relative_eq!(atm.temperature().get::<kelvin>(), 290.1, epsilon = 1e-9);
        assert!(atm.pressure().get::<pascal>() > 101_325.0);
    }

    #[test]
    fn true_airspeed_scales_with_mach() {
        let atm = at(9_000.0);
        assert_relative_eq!(
            atm.true_airspeed(0.5).get::<meter_per_second>(),
            0.5 * atm.speed_of_sound().get::<meter_per_second>(),
            epsilon = 1e-12
        );
    }
}
