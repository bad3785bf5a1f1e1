//! Normal-order beta-reduction.
use log::trace;
use thiserror::Error;

use super::{Term, substitution::substitute};

///The number of passes [`beta_reduce`] is usually given before it gives up.
pub const DEFAULT_MAX_STEPS: usize = 100;

///An error from failing to reduce a term.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReductionError {
    ///The term did not reach a normal form in the allotted number of passes.
    #[error("No normal form was reached after {steps} steps. Last reduction: {last}")]
    Divergent { steps: usize, last: Term },
    ///An abstraction was applied to nothing.
    #[error("{0} applies an abstraction to no arguments")]
    NoArguments(Term),
}

///Reduce `term` to its normal form with leftmost-outermost (normal-order) reduction.
///
///Each pass over the tree reduces at most one redex and then starts again from the root. A pass
///which finds no redex means the term is in normal form.
///
///```
///# use dep2lambda::lambda::{Term, reduction::{beta_reduce, DEFAULT_MAX_STEPS}};
///let t: Term = "(lambda x y.x(y))(\"f\", a)".parse()?;
///assert_eq!(beta_reduce(&t, DEFAULT_MAX_STEPS)?.to_string(), "\"f\"(a)");
///# Ok::<(), anyhow::Error>(())
///```
///
///# Errors
///Returns [`ReductionError::Divergent`] with the last intermediate term if `max_steps` passes
///don't reach a normal form, or [`ReductionError::NoArguments`] if a redex has no arguments.
pub fn beta_reduce(term: &Term, max_steps: usize) -> Result<Term, ReductionError> {
    let mut current = term.clone();
    for step in 0..max_steps {
        let mut reduced = false;
        let next = reduce_leftmost_outermost(&current, &mut reduced)?;
        if !reduced {
            trace!("Normal form after {step} steps: {next}");
            return Ok(next);
        }
        trace!("Step {step}: {next}");
        current = next;
    }
    Err(ReductionError::Divergent {
        steps: max_steps,
        last: current,
    })
}

fn reduce_leftmost_outermost(term: &Term, reduced: &mut bool) -> Result<Term, ReductionError> {
    if *reduced {
        return Ok(term.clone());
    }
    Ok(match term {
        Term::Variable(_) | Term::Constant(_) => term.clone(),
        Term::Application { functor, arguments } => {
            if let Some((name, rest)) = functor.split_abstraction() {
                let Some((first, remaining)) = arguments.split_first() else {
                    return Err(ReductionError::NoArguments(term.clone()));
                };
                *reduced = true;
                let result = substitute(&rest, name, first);
                return Ok(if remaining.is_empty() {
                    result
                } else {
                    Term::apply(result, remaining.iter().cloned())
                });
            }
            let functor = reduce_leftmost_outermost(functor, reduced)?;
            let arguments = arguments
                .iter()
                .map(|x| reduce_leftmost_outermost(x, reduced))
                .collect::<Result<Vec<_>, _>>()?;
            Term::apply(functor, arguments)
        }
        Term::Abstraction { parameters, body } => Term::Abstraction {
            parameters: parameters.clone(),
            body: Box::new(reduce_leftmost_outermost(body, reduced)?),
        },
        Term::Conjunction(operands) => Term::Conjunction(
            operands
                .iter()
                .map(|x| reduce_leftmost_outermost(x, reduced))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Term::Implication(lhs, rhs) => {
            let lhs = reduce_leftmost_outermost(lhs, reduced)?;
            Term::implies(lhs, reduce_leftmost_outermost(rhs, reduced)?)
        }
        Term::Quantifier {
            quantifier,
            vars,
            formula,
        } => Term::Quantifier {
            quantifier: *quantifier,
            vars: vars.clone(),
            formula: Box::new(reduce_leftmost_outermost(formula, reduced)?),
        },
        Term::Negation(formula) => Term::negation(reduce_leftmost_outermost(formula, reduced)?),
    })
}
