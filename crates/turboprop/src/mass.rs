//! Engine weight regression.

use uom::si::{f64::Mass, mass::pound};

/// Uninstalled engine weight from design power (kW), T41 (K) and OPR.
///
/// `W[lb] = 7.937·P^0.9848·T41^-0.5·OPR^0.5`
#[must_use]
pub fn uninstalled_weight(power_kw: f64, t41: f64, opr: f64) -> Mass {
    let pounds = 7.937 * power_kw.powf(0.9848) * t41.powf(-0.5) * opr.sqrt();
    Mass::new::<pound>(pounds)
}
