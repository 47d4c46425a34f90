//! Core traits and types for gaprop.
//!
//! This crate defines the shared abstractions that solvers and engine models
//! build on:
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`EquationProblem`]: adapts solver variables to model inputs and
//!   computes residuals from outputs
//! - [`constraint`]: numeric invariants checked once at construction

pub mod constraint;

mod model;
mod observer;
mod problems;

pub use observer::Observer;
pub use problems::EquationProblem;
pub use {model::Model, model::Snapshot};
