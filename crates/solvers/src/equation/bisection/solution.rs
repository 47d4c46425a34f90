use gaprop_core::Snapshot;

use crate::equation::Evaluation;

use super::Error;

/// How a solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Converged,
    MaxIters,
    StoppedByObserver,
}

/// The root estimate of a bisection solve.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    pub status: Status,
    pub x: f64,
    pub residual: f64,
    pub snapshot: Snapshot<I, O>,
    pub iters: usize,
}

impl<I, O> Solution<I, O> {
    pub(super) fn new(eval: Evaluation<I, O, 1>, status: Status, iters: usize) -> Self {
        let Evaluation {
            x: [x],
            residuals: [residual],
            snapshot,
        } = eval;
        Self {
            status,
            x,
            residual,
            snapshot,
            iters,
        }
    }
}

/// The evaluation with the smallest residual magnitude seen so far.
pub(super) struct Incumbent<I, O>(Option<Evaluation<I, O, 1>>);

impl<I, O> Incumbent<I, O> {
    pub(super) fn new() -> Self {
        Self(None)
    }

    pub(super) fn offer(&mut self, eval: Evaluation<I, O, 1>) {
        let improves = self
            .0
            .as_ref()
            .is_none_or(|best| eval.residuals[0].abs() < best.residuals[0].abs());
        if improves {
            self.0 = Some(eval);
        }
    }

    pub(super) fn within(&self, residual_tol: f64) -> bool {
        self.0
            .as_ref()
            .is_some_and(|best| best.residuals[0].abs() <= residual_tol)
    }

    pub(super) fn into_solution(self, status: Status, iters: usize) -> Result<Solution<I, O>, Error> {
        self.0
            .map(|eval| Solution::new(eval, status, iters))
            .ok_or(Error::NoSuccessfulEvaluation)
    }
}
