//! Bisection root finding for scalar equation problems.
//!
//! A solve starts from a bracket whose endpoint residuals differ in sign and
//! halves it until the bracket or the residual meets the [`Config`]
//! tolerances. Each evaluation is shown to an [`Observer`], which may stop the
//! solve or assign the point a sign, for example when the model fails there.

mod bracket;
mod config;
mod control;
mod error;
mod solution;

pub use bracket::{Bracket, BracketError, Sign};
pub use config::{Config, ConfigError};
pub use control::{Action, Event, Stage};
pub use error::Error;
pub use solution::{Solution, Status};

use gaprop_core::{EquationProblem, Model, Observer};

use crate::equation::{Evaluation, evaluate};

use solution::Incumbent;

/// Finds a root of `problem` in `bracket`.
///
/// An endpoint whose residual is within `residual_tol` is returned without
/// bisecting.
///
/// # Errors
///
/// Returns an error if the config or bracket is invalid, or if an evaluation
/// fails and the observer does not assign it a sign.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    config.validate()?;
    let [lower, upper] = bracket::ordered(bracket)?;

    let mut search = Search {
        model,
        problem,
        observer,
        incumbent: Incumbent::new(),
    };

    let mut signs = [Sign::Positive; 2];
    for (sign, (x, stage)) in signs
        .iter_mut()
        .zip([(lower, Stage::Lower), (upper, Stage::Upper)])
    {
        let Step::Signed(s) = search.step(x, stage, None)? else {
            return search.incumbent.into_solution(Status::StoppedByObserver, 0);
        };
        if search.incumbent.within(config.residual_tol) {
            return search.incumbent.into_solution(Status::Converged, 0);
        }
        *sign = s;
    }

    let mut bracket = Bracket::new([lower, upper], signs[0], signs[1])?;

    for iter in 1..=config.max_iters {
        let mid = bracket.midpoint();
        let x_converged = bracket.is_x_converged(config);

        let (step, eval) = search.evaluate(mid, Stage::Midpoint, Some(&bracket))?;
        let Step::Signed(sign) = step else {
            if let Some(eval) = eval {
                search.incumbent.offer(eval);
            }
            return search.incumbent.into_solution(Status::StoppedByObserver, iter);
        };

        let residual_converged = eval
            .as_ref()
            .is_some_and(|eval| eval.residuals[0].abs() <= config.residual_tol);
        if x_converged || residual_converged {
            return match eval {
                Some(eval) => Ok(Solution::new(eval, Status::Converged, iter)),
                None => search.incumbent.into_solution(Status::Converged, iter),
            };
        }

        if let Some(eval) = eval {
            search.incumbent.offer(eval);
        }
        bracket.narrow(mid, sign);
    }

    search.incumbent.into_solution(Status::MaxIters, config.max_iters)
}

/// Runs bisection without an observer, so any failed evaluation is an error.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, bracket, config, ())
}

/// How to proceed after an evaluation.
enum Step {
    Signed(Sign),
    Stop,
}

struct Search<'s, M: Model, P, Obs> {
    model: &'s M,
    problem: &'s P,
    observer: Obs,
    incumbent: Incumbent<M::Input, M::Output>,
}

impl<M, P, Obs> Search<'_, M, P, Obs>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    /// Evaluates an endpoint and records it as a candidate.
    fn step(&mut self, x: f64, stage: Stage, bracket: Option<&Bracket>) -> Result<Step, Error> {
        let (step, eval) = self.evaluate(x, stage, bracket)?;
        if let Some(eval) = eval {
            self.incumbent.offer(eval);
        }
        Ok(step)
    }

    /// Evaluates at `x` and applies the observer's action.
    ///
    /// The evaluation is returned only if it may be reported as a solution.
    #[allow(clippy::type_complexity)]
    fn evaluate(
        &mut self,
        x: f64,
        stage: Stage,
        bracket: Option<&Bracket>,
    ) -> Result<(Step, Option<Evaluation<M::Input, M::Output, 1>>), Error> {
        let result = evaluate(self.model, self.problem, [x]);
        let action = self.observer.observe(&Event {
            stage,
            x,
            bracket,
            result: &result,
        });

        let finite = |eval: &Evaluation<M::Input, M::Output, 1>| eval.residuals[0].is_finite();
        match action {
            Some(Action::StopEarly) => Ok((Step::Stop, result.ok().filter(finite))),
            Some(Action::AssumeSign(sign)) => Ok((Step::Signed(sign), None)),
            None => {
                let eval = result.map_err(|source| Error::Evaluation {
                    x,
                    source: Box::new(source),
                })?;
                let residual = eval.residuals[0];
                if !residual.is_finite() {
                    return Err(Error::NonFiniteResidual { x, residual });
                }
                Ok((Step::Signed(Sign::of(residual)), Some(eval)))
            }
        }
    }
}
