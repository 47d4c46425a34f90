//! Shared fixtures for unit tests.

use crate::{BasicTurboprop, EngineConfig, EngineDesignSpec};

pub(crate) const REFERENCE_TOML: &str = include_str!("../tests/data/reference_engine.toml");

pub(crate) fn reference_config() -> EngineConfig {
    EngineConfig::from_toml_str(REFERENCE_TOML).expect("reference engine parses")
}

pub(crate) fn reference_spec() -> EngineDesignSpec {
    reference_config()
        .design_spec()
        .expect("reference spec is valid")
}

pub(crate) fn reference_engine() -> BasicTurboprop {
    reference_config().build().expect("reference engine sizes")
}
