//! Hoisting quantifiers out of conjunctions and checking the final semantic form.
use log::debug;
use thiserror::Error;

use super::{Quantifier, Term, variables::assert_unique_vars};

///An error from a term having the wrong shape.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShapeError {
    ///A binder's name is re-declared below it, so hoisting could conflate two variables.
    #[error("{name} is shadowed inside {term}")]
    ShadowedVariable { name: String, term: Term },
    ///A semantic form must be an abstraction.
    #[error("{0} is not an abstraction")]
    NotAnAbstraction(Term),
    ///A semantic form takes exactly one parameter.
    #[error("{term} should take exactly 1 parameter but takes {parameters}")]
    WrongArity { parameters: usize, term: Term },
    ///The body is neither a predicate nor a conjunction of predicates.
    #[error("{0} is neither a predicate nor a flat conjunction of predicates")]
    UnexpectedBody(Term),
    ///A conjunct that isn't a constant applied to something.
    #[error("{0} is not a predicate")]
    NotAPredicate(Term),
    ///A predicate argument that isn't a variable.
    #[error("{argument} is not a variable in {predicate}")]
    NonVariableArgument { argument: Term, predicate: Term },
}

///Flatten nested conjunctions and hoist the quantifiers directly under them.
///
///Conjunctions are flattened associatively while keeping operand order, and the variables of any
///quantifier found among the operands are pulled out to wrap the whole conjunction. Existential
///variables end up in one `some` and universal variables in one `every`, each in the order they
///were met, giving `every ….some ….a & b & …`. Hoisting only goes through conjunctions; every
///other node is flattened structurally.
///
///```
///# use dep2lambda::lambda::{Term, flatten::flatten};
///let t: Term = "lambda x.\"P\"(x) & (some e.\"Q\"(e) & \"R\"(e, x))".parse()?;
///assert_eq!(
///    flatten(&t)?.to_string(),
///    "lambda x.some e.\"P\"(x) & \"Q\"(e) & \"R\"(e, x)"
///);
///# Ok::<(), anyhow::Error>(())
///```
///
///# Errors
///Hoisting is only sound when no name is shadowed, so this fails with
///[`ShapeError::ShadowedVariable`] if [`assert_unique_vars`] does.
pub fn flatten(term: &Term) -> Result<Term, ShapeError> {
    assert_unique_vars(term)?;
    Ok(flatten_unchecked(term))
}

#[derive(Debug, Default)]
struct Hoisted {
    existentials: Vec<String>,
    universals: Vec<String>,
    operands: Vec<Term>,
}

impl Hoisted {
    fn absorb(&mut self, term: Term) {
        match term {
            Term::Conjunction(operands) => {
                for operand in operands {
                    self.absorb(operand);
                }
            }
            Term::Quantifier {
                quantifier,
                vars,
                formula,
            } => {
                debug!("Hoisting {} out of a conjunction", vars.join(", "));
                match quantifier {
                    Quantifier::Existential => self.existentials.extend(vars),
                    Quantifier::Universal => self.universals.extend(vars),
                }
                self.absorb(*formula);
            }
            _ => self.operands.push(term),
        }
    }

    fn wrap(self) -> Term {
        let mut term = Term::Conjunction(self.operands);
        if !self.existentials.is_empty() {
            term = Term::Quantifier {
                quantifier: Quantifier::Existential,
                vars: self.existentials,
                formula: Box::new(term),
            };
        }
        if !self.universals.is_empty() {
            term = Term::Quantifier {
                quantifier: Quantifier::Universal,
                vars: self.universals,
                formula: Box::new(term),
            };
        }
        term
    }
}

fn flatten_unchecked(term: &Term) -> Term {
    match term {
        Term::Variable(_) | Term::Constant(_) => term.clone(),
        Term::Conjunction(operands) => {
            let mut hoisted = Hoisted::default();
            for operand in operands {
                hoisted.absorb(flatten_unchecked(operand));
            }
            hoisted.wrap()
        }
        Term::Abstraction { parameters, body } => Term::Abstraction {
            parameters: parameters.clone(),
            body: Box::new(flatten_unchecked(body)),
        },
        Term::Application { functor, arguments } => Term::apply(
            flatten_unchecked(functor),
            arguments.iter().map(flatten_unchecked),
        ),
        Term::Implication(lhs, rhs) => {
            Term::implies(flatten_unchecked(lhs), flatten_unchecked(rhs))
        }
        Term::Quantifier {
            quantifier,
            vars,
            formula,
        } => Term::Quantifier {
            quantifier: *quantifier,
            vars: vars.clone(),
            formula: Box::new(flatten_unchecked(formula)),
        },
        Term::Negation(formula) => Term::negation(flatten_unchecked(formula)),
    }
}

fn validate_predicate(term: &Term) -> Result<(), ShapeError> {
    let Term::Application { functor, arguments } = term else {
        return Err(ShapeError::NotAPredicate(term.clone()));
    };
    if !matches!(functor.as_ref(), Term::Constant(_)) {
        return Err(ShapeError::NotAPredicate(term.clone()));
    }
    match arguments
        .iter()
        .find(|x| !matches!(x, Term::Variable(_)))
    {
        Some(argument) => Err(ShapeError::NonVariableArgument {
            argument: argument.clone(),
            predicate: term.clone(),
        }),
        None => Ok(()),
    }
}

///Checks that `term` is in semantic form: an abstraction over exactly one parameter whose body is
///either a single predicate or a flat conjunction of predicates under any number of quantifiers.
///A predicate is a constant applied to variables only.
///
///# Errors
///Returns the [`ShapeError`] describing the first sub-term with the wrong shape.
pub fn validate_semantic_form(term: &Term) -> Result<(), ShapeError> {
    let Term::Abstraction { parameters, body } = term else {
        return Err(ShapeError::NotAnAbstraction(term.clone()));
    };
    if parameters.len() != 1 {
        return Err(ShapeError::WrongArity {
            parameters: parameters.len(),
            term: term.clone(),
        });
    }

    if let Term::Application { .. } = body.as_ref() {
        return validate_predicate(body);
    }

    let mut inner = body.as_ref();
    while let Term::Quantifier { formula, .. } = inner {
        inner = formula;
    }
    match inner {
        Term::Conjunction(operands) => operands.iter().try_for_each(validate_predicate),
        _ => Err(ShapeError::UnexpectedBody(body.as_ref().clone())),
    }
}

///[`flatten`] a term and then check it is in semantic form.
///
///# Errors
///Returns a [`ShapeError`] if either step fails.
pub fn into_semantic_form(term: &Term) -> Result<Term, ShapeError> {
    let term = flatten(term)?;
    validate_semantic_form(&term)?;
    Ok(term)
}
