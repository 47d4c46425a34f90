use approx::assert_relative_eq;
use gaprop_turboprop::{
    BasicTurboprop, EngineConfig, EngineSetting, FlightPoint, FlightPointBatch, Limit, Propulsion,
    jacobian::partials,
};
use uom::si::{
    area::square_meter,
    f64::{Force, Length},
    force::newton,
    length::meter,
    mass::pound,
    mass_rate::kilogram_per_second,
    power::kilowatt,
};

const REFERENCE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/reference_engine.toml");

fn engine() -> BasicTurboprop {
    EngineConfig::from_path(REFERENCE)
        .expect("reference file parses")
        .build()
        .expect("reference engine sizes")
}

/// The reference engine scaled up to 1800 shp with a hotter, higher pressure core.
fn larger_engine() -> BasicTurboprop {
    let text = std::fs::read_to_string(REFERENCE).unwrap();
    let text = text
        .replace("power = 745.7", "power = 1342.26")
        .replace("turbine_inlet_temperature = 1350.0", "turbine_inlet_temperature = 1600.0")
        .replace("overall_pressure_ratio = 9.5", "overall_pressure_ratio = 11.4");
    EngineConfig::from_toml_str(&text).unwrap().build().unwrap()
}

fn rated(altitude: f64, mach: f64, rate: f64) -> FlightPoint {
    FlightPoint::with_rate(Length::new::<meter>(altitude), mach, EngineSetting::Takeoff, rate)
}

fn regulated(altitude: f64, mach: f64, thrust: f64) -> FlightPoint {
    FlightPoint::with_thrust(
        Length::new::<meter>(altitude),
        mach,
        EngineSetting::Takeoff,
        Force::new::<newton>(thrust),
    )
}

#[test]
fn sizing_is_positive_and_ordered() {
    let sizing = *engine().sizing();

    assert_relative_eq!(
        sizing.core_mass_flow().get::<kilogram_per_second>(),
        3.641_477,
        max_relative = 1e-5
    );
    let a41 = sizing.hp_turbine_area().get::<square_meter>();
    let a45 = sizing.power_turbine_area().get::<square_meter>();
    let a8 = sizing.nozzle_area().get::<square_meter>();
    assert!(0.0 < a41 && a41 < a45 && a45 < a8);
}

#[test]
fn thrust_and_sfc_at_rated_points() {
    let engine = engine();

    // (altitude m, Mach, rate, thrust N, SFC kg/(N s), reference thrust, reference SFC)
    let cases = [
        (0.0, 0.3, 0.8, 3541.191_287, 1.487_99e-5, 3552.993_438, 1.471_528e-5),
        (1000.0, 0.4, 0.4, 1366.929_528, 2.543_260e-5, 1355.227_044, 2.576_356e-5),
        (2400.0, 0.4, 0.7, 2438.903_551, 1.801_168e-5, 2436.320_399, 1.766_113e-5),
    ];

    for (altitude, mach, rate, thrust, sfc, ref_thrust, ref_sfc) in cases {
        let mut point = rated(altitude, mach, rate);
        engine.compute_flight_point(&mut point).unwrap();

        let computed = point.thrust.get::<newton>();
        assert_relative_eq!(computed, thrust, max_relative = 1e-3);
        assert_relative_eq!(point.sfc, sfc, max_relative = 1e-3);
        assert_relative_eq!(point.thrust_rate, rate, epsilon = 1e-12);

        assert_relative_eq!(computed, ref_thrust, max_relative = 0.01);
        assert_relative_eq!(point.sfc, ref_sfc, max_relative = 0.02);
    }
}

#[test]
fn half_rate_at_sea_level() {
    let engine = engine();
    let mut point = rated(0.0, 0.3, 0.5);
    engine.compute_flight_point(&mut point).unwrap();

    assert_relative_eq!(point.thrust.get::<newton>(), 2213.244_554, max_relative = 1e-3);
    assert_relative_eq!(point.sfc, 1.835_678e-5, max_relative = 1e-3);
}

#[test]
fn regulated_thrust() {
    let engine = engine();

    // (altitude m, Mach, thrust N, SFC kg/(N s))
    let cases = [
        (0.0, 0.3, 3552.993_438, 1.486_087e-5),
        (1000.0, 0.4, 1355.227_044, 2.553_092e-5),
        (3000.0, 0.25, 1500.0, 1.728_765e-5),
    ];

    for (altitude, mach, thrust, sfc) in cases {
        let mut point = regulated(altitude, mach, thrust);
        engine.compute_flight_point(&mut point).unwrap();

        let max_thrust = engine.compute_max_thrust(&point).unwrap().get::<newton>();
        assert_relative_eq!(point.thrust.get::<newton>(), thrust, max_relative = 1e-12);
        assert_relative_eq!(point.thrust_rate, thrust / max_thrust, max_relative = 1e-9);
        assert_relative_eq!(point.sfc, sfc, max_relative = 1e-3);
    }

    let max_thrust = engine
        .compute_max_thrust(&regulated(3000.0, 0.25, 0.0))
        .unwrap()
        .get::<newton>();
    assert_relative_eq!(max_thrust, 5247.843, max_relative = 1e-3);
}

#[test]
fn rate_and_regulated_thrust_agree() {
    let engine = engine();

    let mut by_rate = rated(1500.0, 0.35, 0.6);
    engine.compute_flight_point(&mut by_rate).unwrap();

    let mut by_thrust = regulated(1500.0, 0.35, by_rate.thrust.get::<newton>());
    engine.compute_flight_point(&mut by_thrust).unwrap();

    assert_relative_eq!(by_thrust.thrust_rate, 0.6, max_relative = 1e-9);
    assert_relative_eq!(by_thrust.sfc, by_rate.sfc, max_relative = 1e-9);
}

#[test]
fn max_power_is_flat_rated_at_low_altitude() {
    let engine = engine();

    let conditions = [
        (0.0, 0.5),
        (3000.0, 0.5),
        (6000.0, 0.5),
        (0.0, 0.3),
        (0.0, 0.0),
        (-300.0, 0.2),
    ];
    for (altitude, mach) in conditions {
        let point = rated(altitude, mach, 1.0);
        let power = engine.compute_max_power(&point).unwrap().get::<kilowatt>();

        assert_relative_eq!(power, 521.99, epsilon = 1.0);
        assert_eq!(engine.binding_limit(&point).unwrap(), Limit::Power);
    }
}

#[test]
fn max_power_lapses_at_altitude() {
    let engine = engine();

    let cases = [(9000.0, 0.5, 337.57), (9000.0, 0.8, 502.70)];
    for (altitude, mach, expected) in cases {
        let power = engine
            .compute_max_power(&rated(altitude, mach, 1.0))
            .unwrap()
            .get::<kilowatt>();
        assert_relative_eq!(power, expected, max_relative = 0.01);
    }
    assert_eq!(engine.binding_limit(&rated(9000.0, 0.5, 1.0)).unwrap(), Limit::Opr);
}

#[test]
fn max_power_does_not_increase_with_altitude() {
    let engine = engine();

    let powers: Vec<f64> = (0..=8)
        .map(|i| {
            engine
                .max_power_at(Length::new::<meter>(1500.0 * f64::from(i)), 0.5, EngineSetting::Climb)
                .unwrap()
                .get::<kilowatt>()
        })
        .collect();

    for pair in powers.windows(2) {
        assert!(pair[1] <= pair[0] * (1.0 + 1e-9), "{powers:?}");
    }
}

#[test]
fn outputs_are_non_negative_over_the_envelope() {
    let engine = engine();

    for altitude in [0.0, 2000.0, 5000.0, 8000.0] {
        for mach in [0.1, 0.3, 0.5] {
            for rate in [0.0, 0.3, 0.7, 1.0] {
                let mut point = rated(altitude, mach, rate);
                engine.compute_flight_point(&mut point).unwrap();

                assert!(point.thrust.get::<newton>() >= 0.0);
                assert!(point.sfc >= 0.0 && point.sfc.is_finite());
            }
        }
    }
}

#[test]
fn batch_of_parallel_arrays() {
    let engine = engine();
    let mut batch = FlightPointBatch {
        mach: vec![0.3, 0.4, 0.3],
        altitude: vec![0.0, 1000.0, 0.0],
        setting: vec![1, 3, 2],
        thrust_is_regulated: vec![false, true, true],
        thrust_rate: vec![0.8, 0.0, 0.0],
        thrust: vec![0.0, 1355.227_044, 9000.0],
        sfc: Vec::new(),
    };

    let report = engine.compute_flight_batch(&mut batch).unwrap();

    assert!(report.is_clean());
    assert_eq!(batch.sfc.len(), 3);
    assert_relative_eq!(batch.thrust[0], 3541.191_287, max_relative = 1e-3);
    assert_relative_eq!(batch.sfc[1], 2.553_092e-5, max_relative = 1e-3);
    assert_relative_eq!(batch.thrust[2], 4426.489, max_relative = 1e-3);
    assert_relative_eq!(batch.thrust_rate[2], 1.0, epsilon = 1e-9);
}

#[test]
fn unknown_setting_code_fails_the_batch() {
    let engine = engine();
    let mut batch = FlightPointBatch {
        mach: vec![0.3],
        altitude: vec![0.0],
        setting: vec![9],
        thrust_is_regulated: vec![false],
        thrust_rate: vec![0.5],
        thrust: vec![0.0],
        sfc: Vec::new(),
    };

    assert!(engine.compute_flight_batch(&mut batch).is_err());
}

#[test]
fn weight_and_dimensions() {
    let engine = engine();
    assert_relative_eq!(engine.compute_weight().get::<pound>(), 449.006, epsilon = 1.0);

    let expected = [0.61, 0.54, 3.54, 8.23];
    for (value, expected) in engine.compute_dimensions().to_array().into_iter().zip(expected) {
        assert_relative_eq!(value, expected, epsilon = 0.01);
    }
}

#[test]
fn larger_engine_scales_weight_and_nacelle() {
    let engine = larger_engine();

    assert_relative_eq!(engine.compute_weight().get::<pound>(), 806.0, epsilon = 1.0);

    let expected = [0.61, 0.54, 3.77, 8.75];
    for (value, expected) in engine.compute_dimensions().to_array().into_iter().zip(expected) {
        assert_relative_eq!(value, expected, epsilon = 0.01);
    }

    let power = engine
        .compute_max_power(&rated(0.0, 0.3, 1.0))
        .unwrap()
        .get::<kilowatt>();
    assert_relative_eq!(power, 521.99, epsilon = 1.0);
}

#[test]
fn partials_at_full_rate_use_a_backward_step() {
    let engine = engine();
    let point = rated(3000.0, 0.4, 1.0);
    let partials = partials(&engine, &point).unwrap();

    let max_thrust = engine.compute_max_thrust(&point).unwrap().get::<newton>();
    assert_relative_eq!(partials.thrust.command, max_thrust, max_relative = 1e-4);
    assert!(partials.sfc.altitude.is_finite() && partials.sfc.mach.is_finite());
}
