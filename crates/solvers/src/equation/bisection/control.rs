use gaprop_core::{EquationProblem, Model};

use crate::equation::EvaluateResult;

use super::{Bracket, Sign};

/// What an observer can tell the solver after an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Return the best evaluation so far.
    StopEarly,
    /// Use this sign for the evaluated point instead of its residual.
    ///
    /// Lets a solve continue past failed evaluations. The point is never
    /// reported as the solution, even if its evaluation succeeded.
    AssumeSign(Sign),
}

impl Action {
    #[must_use]
    pub fn assume_positive() -> Self {
        Self::AssumeSign(Sign::Positive)
    }

    #[must_use]
    pub fn assume_negative() -> Self {
        Self::AssumeSign(Sign::Negative)
    }
}

/// Which point of the solve an evaluation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lower,
    Upper,
    Midpoint,
}

/// One evaluation, as seen by an observer.
pub struct Event<'a, M, P>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    pub stage: Stage,
    pub x: f64,
    /// The bracket being bisected; `None` while the endpoints are evaluated.
    pub bracket: Option<&'a Bracket>,
    pub result: &'a EvaluateResult<M, P, 1>,
}

impl<'a, M, P> Event<'a, M, P>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    #[must_use]
    pub fn result(&self) -> &'a EvaluateResult<M, P, 1> {
        self.result
    }

    /// The residual, if the evaluation succeeded.
    #[must_use]
    pub fn residual(&self) -> Option<f64> {
        self.result.as_ref().ok().map(|eval| eval.residuals[0])
    }
}
