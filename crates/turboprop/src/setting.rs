//! Tags that select engine behavior.

use std::{fmt, str::FromStr};

use crate::EngineError;

/// Engine operating regime.
///
/// The regime selects which rating is applied to the available power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineSetting {
    Takeoff,
    Climb,
    Cruise,
    Idle,
    Descent,
}

impl EngineSetting {
    pub const ALL: [Self; 5] = [
        Self::Takeoff,
        Self::Climb,
        Self::Cruise,
        Self::Idle,
        Self::Descent,
    ];

    /// Numeric code used by array-valued flight point inputs.
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Takeoff => 1,
            Self::Climb => 2,
            Self::Cruise => 3,
            Self::Idle => 4,
            Self::Descent => 5,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Takeoff => "takeoff",
            Self::Climb => "climb",
            Self::Cruise => "cruise",
            Self::Idle => "idle",
            Self::Descent => "descent",
        }
    }
}

impl TryFrom<i64> for EngineSetting {
    type Error = EngineError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|setting| setting.code() == code)
            .ok_or_else(|| EngineError::UnknownLimit(code.to_string()))
    }
}

impl FromStr for EngineSetting {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|setting| setting.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| EngineError::UnknownLimit(s.to_string()))
    }
}

impl fmt::Display for EngineSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the propeller is mounted on the airframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropellerLayout {
    Wing,
    Fuselage,
    Nose,
}

impl TryFrom<i64> for PropellerLayout {
    type Error = EngineError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Wing),
            2 => Ok(Self::Fuselage),
            3 => Ok(Self::Nose),
            other => Err(EngineError::UnknownLayout(other)),
        }
    }
}
