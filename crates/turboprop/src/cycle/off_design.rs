use gaprop_solvers::equation::scan;

use crate::{EngineError, root};

use super::{CoreState, Cycle, CycleError, FlightCondition, GAS, Sizing};

/// Compressor ratios scanned for the turbine matching.
const PRESSURE_RATIO_RANGE: [f64; 2] = [1.02, 100.0];
const PRESSURE_RATIO_INTERVALS: usize = 80;

/// A matched off-design state of the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct OperatingPoint {
    /// Turbine entry temperature (K).
    pub t41: f64,
    /// Shaft power delivered to the propeller after the gearbox (W).
    pub shaft_power: f64,
    /// Fuel mass flow (kg/s).
    pub fuel_flow: f64,
    /// Power turbine inlet temperature (K).
    pub itt: f64,
    /// Overall pressure ratio relative to free-stream total pressure.
    pub opr: f64,
    pub compressor_pressure_ratio: f64,
    /// Compressor face mass flow (kg/s).
    pub core_mass_flow: f64,
}

/// A sized gas generator driving a free power turbine.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GasGenerator {
    pub(crate) cycle: Cycle,
    pub(crate) sizing: Sizing,
}

impl GasGenerator {
    /// Matches the engine at `condition` with turbine entry temperature `t41`.
    ///
    /// The compressor ratio balances the flow through the two choked turbine
    /// stations. At low ratios the HP turbine cannot drive the compressors, so
    /// the matching residual has a spurious root there; the physical solution is
    /// the highest root, found by scanning downward from the top of the range.
    pub(crate) fn operate(
        &self,
        condition: &FlightCondition,
        t41: f64,
    ) -> Result<OperatingPoint, EngineError> {
        let cycle = &self.cycle;
        let choked = GAS.choked_flow_parameter();
        let Sizing { a41, a45, a8, .. } = self.sizing;

        let state = |pressure_ratio: f64| -> Result<(f64, CoreState), CycleError> {
            let far = cycle.burner_fuel_air_ratio(condition.tt2, pressure_ratio, t41)?;
            let pt41 = condition.pt2 * pressure_ratio * cycle.burner_pressure_ratio;
            let m41 = choked * a41 * pt41 / t41.sqrt();
            let m2 = cycle.face_flow(m41, far);
            cycle
                .gas_generator(m2, condition, pressure_ratio, t41)
                .map(|core| (m2, core))
        };

        let matching = |pressure_ratio: f64| -> Result<f64, CycleError> {
            let (_, core) = state(pressure_ratio)?;
            let passed = choked * a45 * core.pt45 / core.tt45.sqrt();
            Ok((passed - core.m45) / core.m45)
        };

        let grid = scan::geometric_grid(
            PRESSURE_RATIO_RANGE[0],
            PRESSURE_RATIO_RANGE[1],
            PRESSURE_RATIO_INTERVALS,
        );
        let bracket = scan::last_sign_change(&grid, matching)
            .ok_or_else(|| condition.no_operating_point(t41))?;
        let pressure_ratio =
            root::solve_failures_negative("compressor pressure ratio", bracket, matching)?;

        let (m2, core) = state(pressure_ratio).map_err(|_| condition.no_operating_point(t41))?;
        let (pt45, tt45, m45) = (core.pt45, core.tt45, core.m45);

        let nozzle = |pt5: f64| -> Result<f64, CycleError> {
            let tt5 = cycle.power_turbine_exit(tt45, pt45, pt5)?;
            let mach = GAS.mach_from_pressure_ratio(pt5 / condition.p0).min(1.0);
            Ok(a8 * pt5 / tt5.sqrt() * GAS.mass_flow_parameter(mach) - m45)
        };

        let no_point = |_: CycleError| condition.no_operating_point(t41);
        // Without a pressure drop across the power turbine the gas generator
        // cannot sustain itself.
        if pt45 <= condition.p0 || nozzle(pt45).map_err(no_point)? <= 0.0 {
            return Err(condition.no_operating_point(t41));
        }
        let pt5 = root::solve("nozzle total pressure", [condition.p0, pt45], nozzle)?;

        let tt5 = cycle.power_turbine_exit(tt45, pt45, pt5).map_err(no_point)?;
        let shaft_power = cycle.delivered_power(cycle.turbine_shaft_power(m45, tt45, tt5));
        if !(shaft_power.is_finite() && shaft_power > 0.0) {
            return Err(condition.no_operating_point(t41));
        }

        Ok(OperatingPoint {
            t41,
            shaft_power,
            fuel_flow: core.fuel_flow,
            itt: tt45,
            opr: pressure_ratio * condition.pt2 / condition.pt0,
            compressor_pressure_ratio: pressure_ratio,
            core_mass_flow: m2,
        })
    }
}
