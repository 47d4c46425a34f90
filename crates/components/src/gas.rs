//! Calorically perfect gas relations for one-dimensional compressible flow.
//!
//! All values are plain SI `f64`: temperatures in K, pressures in Pa,
//! mass flow parameters in kg·√K/(N·s).

/// A calorically perfect gas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfectGas {
    /// Ratio of specific heats.
    pub gamma: f64,
    /// Specific gas constant (J/(kg·K)).
    pub gas_constant: f64,
}

impl PerfectGas {
    /// Dry air.
    pub const AIR: Self = Self {
        gamma: 1.4,
        gas_constant: 287.05,
    };

    /// Hot combustion products downstream of the burner.
    pub const COMBUSTION_PRODUCTS: Self = Self {
        gamma: 1.34,
        gas_constant: 287.05,
    };

    /// Specific heat at constant pressure (J/(kg·K)).
    #[must_use]
    pub fn cp(&self) -> f64 {
        self.gamma * self.gas_constant / (self.gamma - 1.0)
    }

    /// Exponent `(γ - 1) / γ` linking pressure and temperature ratios.
    #[must_use]
    pub fn isentropic_exponent(&self) -> f64 {
        (self.gamma - 1.0) / self.gamma
    }

    #[must_use]
    pub fn speed_of_sound(&self, temperature: f64) -> f64 {
        (self.gamma * self.gas_constant * temperature).sqrt()
    }

    /// `Tt / T` at Mach `mach`.
    #[must_use]
    pub fn total_temperature_ratio(&self, mach: f64) -> f64 {
        1.0 + 0.5 * (self.gamma - 1.0) * mach * mach
    }

    /// `Pt / P` at Mach `mach`.
    #[must_use]
    pub fn total_pressure_ratio(&self, mach: f64) -> f64 {
        self.total_temperature_ratio(mach)
            .powf(1.0 / self.isentropic_exponent())
    }

    /// Corrected flow `ṁ·√Tt / (A·Pt)` through a section at Mach `mach`.
    #[must_use]
    pub fn mass_flow_parameter(&self, mach: f64) -> f64 {
        let g = self.gamma;
        (g / self.gas_constant).sqrt()
            * mach
            * self
                .total_temperature_ratio(mach)
                .powf(-(g + 1.0) / (2.0 * (g - 1.0)))
    }

    /// Corrected flow through a choked (Mach 1) section.
    #[must_use]
    pub fn choked_flow_parameter(&self) -> f64 {
        let g = self.gamma;
        (g / self.gas_constant).sqrt() * (2.0 / (g + 1.0)).powf((g + 1.0) / (2.0 * (g - 1.0)))
    }

    /// Mach number of an isentropic expansion with total-to-static ratio `pt_over_p`.
    ///
    /// Ratios at or below one give zero.
    #[must_use]
    pub fn mach_from_pressure_ratio(&self, pt_over_p: f64) -> f64 {
        let t_ratio = pt_over_p.powf(self.isentropic_exponent());
        (2.0 / (self.gamma - 1.0) * (t_ratio - 1.0)).max(0.0).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn air_cp() {
        assert_relative_eq!(PerfectGas::AIR.cp(), 1004.675, epsilon = 1e-9);
    }

    #[test]
    fn total_ratios_at_mach_one() {
        let air = PerfectGas::AIR;
        assert_relative_eq!(air.total_temperature_ratio(1.0), 1.2);
        assert_relative_eq!(air.total_pressure_ratio(1.0), 1.892_929, max_relative = 1e-6);
    }

    #[test]
    fn mass_flow_parameter_peaks_at_choke() {
        let gas = PerfectGas::COMBUSTION_PRODUCTS;
        let choked = gas.choked_flow_parameter();

        assert_relative_eq!(gas.mass_flow_parameter(1.0), choked, max_relative = 1e-12);
        assert!(gas.mass_flow_parameter(0.8) < choked);
        assert!(gas.mass_flow_parameter(1.2) < choked);
        assert_relative_eq!(gas.mass_flow_parameter(0.0), 0.0);
    }

    #[test]
    fn mach_inverts_pressure_ratio() {
        let gas = PerfectGas::COMBUSTION_PRODUCTS;
        for mach in [0.1, 0.4, 0.9, 1.5] {
            assert_relative_eq!(
                gas.mach_from_pressure_ratio(gas.total_pressure_ratio(mach)),
                mach,
                max_relative = 1e-10
            );
        }
        assert_relative_eq!(gas.mach_from_pressure_ratio(0.9), 0.0);
    }
}
