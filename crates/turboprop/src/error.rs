use gaprop_core::constraint::ConstraintError;
use gaprop_solvers::equation::bisection;
use thiserror::Error;

/// Errors raised while building or evaluating a turboprop model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// A design or flight-point parameter is outside its valid range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The design inputs do not yield a physical engine.
    #[error("impossible engine geometry: {0}")]
    ImpossibleGeometry(String),

    /// An engine setting code or name is not recognized.
    #[error("unknown engine setting `{0}`")]
    UnknownLimit(String),

    /// A propeller layout code is not recognized.
    #[error("unknown propeller layout code {0}")]
    UnknownLayout(i64),

    /// A propeller performance table is malformed.
    #[error("propeller table `{table}`: {reason}")]
    Table { table: &'static str, reason: String },

    /// The gas generator cannot run at the requested condition.
    #[error("no operating point at altitude {altitude} m, Mach {mach}, T41 {t41} K")]
    NoOperatingPoint { altitude: f64, mach: f64, t41: f64 },

    /// A bisection solve failed.
    #[error("failed to solve for {quantity}")]
    Solver {
        quantity: &'static str,
        #[source]
        source: bisection::Error,
    },

    /// Parallel flight point arrays have different lengths.
    #[error("flight point field `{field}` has {actual} entries, expected {expected}")]
    BatchLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl EngineError {
    pub(crate) fn invalid(name: &'static str, reason: impl ToString) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.to_string(),
        }
    }

    /// Maps a constraint violation into an [`EngineError::InvalidParameter`] naming `name`.
    pub(crate) fn constraint(name: &'static str) -> impl FnOnce(ConstraintError) -> Self {
        move |source| Self::invalid(name, source)
    }

    pub(crate) fn solver(quantity: &'static str) -> impl FnOnce(bisection::Error) -> Self {
        move |source| Self::Solver { quantity, source }
    }
}
