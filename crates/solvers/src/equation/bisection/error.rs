use std::error::Error as StdError;

use thiserror::Error;

use super::{BracketError, ConfigError};

/// Errors that end a bisection solve.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid bracket: {0}")]
    InvalidBracket(#[from] BracketError),

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("no evaluation succeeded")]
    NoSuccessfulEvaluation,

    #[error("residual at x = {x} is {residual}")]
    NonFiniteResidual { x: f64, residual: f64 },

    /// An evaluation failed and the observer did not assign it a sign.
    #[error("evaluation at x = {x} failed")]
    Evaluation {
        x: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}
