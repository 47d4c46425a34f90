//! Numerical solvers for gaprop.
//!
//! - [`equation`]: root finding for [`EquationProblem`]s
//!
//! [`EquationProblem`]: gaprop_core::EquationProblem

pub mod equation;
