//! Alpha-renaming and capture-avoiding substitution.
use ahash::HashSet;
use thiserror::Error;

use super::{
    Binder, Term,
    variables::{bound_vars, free_vars, used_vars},
};

///An error from alpha-renaming something that can't be renamed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenameError {
    ///Only abstractions and quantifiers declare names.
    #[error("{0} is not a binder and can't be alpha-renamed")]
    NotABinder(Term),
    ///The binder doesn't declare the name.
    #[error("{name} is not declared by {term}")]
    NotBound { name: String, term: Term },
}

///Rename the declared name `old` of a binder to `new`, along with every occurrence of `old` in its
///body which refers to it.
///
///Nested binders that re-declare `old` are left untouched, since `old` already means something
///else inside them.
///
///```
///# use dep2lambda::lambda::{Term, substitution::alpha_rename};
///let f: Term = "lambda f x.f(f(x))".parse()?;
///assert_eq!(alpha_rename(&f, "x", "y")?.to_string(), "lambda f y.f(f(y))");
///# Ok::<(), anyhow::Error>(())
///```
///
///# Errors
///Returns a [`RenameError`] if `term` is not an abstraction or quantifier, or if it doesn't declare
///`old`.
pub fn alpha_rename(term: &Term, old: &str, new: &str) -> Result<Term, RenameError> {
    let Some((binder, names, body)) = term.as_binder() else {
        return Err(RenameError::NotABinder(term.clone()));
    };
    if !names.iter().any(|name| name == old) {
        return Err(RenameError::NotBound {
            name: old.to_string(),
            term: term.clone(),
        });
    }
    Ok(rename_binder(binder, names, body, old, new))
}

fn rename_binder(binder: Binder, names: &[String], body: &Term, old: &str, new: &str) -> Term {
    let mut names = names.to_vec();
    if let Some(name) = names.iter_mut().find(|name| name.as_str() == old) {
        *name = new.to_string();
    }
    binder.bind(names, rename_free(body, old, new))
}

fn rename_free(term: &Term, old: &str, new: &str) -> Term {
    match term {
        Term::Variable(name) if name == old => Term::var(new),
        Term::Variable(_) | Term::Constant(_) => term.clone(),
        Term::Application { functor, arguments } => Term::apply(
            rename_free(functor, old, new),
            arguments.iter().map(|x| rename_free(x, old, new)),
        ),
        Term::Conjunction(operands) => Term::Conjunction(
            operands
                .iter()
                .map(|x| rename_free(x, old, new))
                .collect(),
        ),
        Term::Implication(lhs, rhs) => {
            Term::implies(rename_free(lhs, old, new), rename_free(rhs, old, new))
        }
        Term::Negation(formula) => Term::negation(rename_free(formula, old, new)),
        Term::Abstraction { parameters, body } => {
            rename_under(term, Binder::Lambda, parameters, body, old, new)
        }
        Term::Quantifier {
            quantifier,
            vars,
            formula,
        } => rename_under(term, Binder::Quantifier(*quantifier), vars, formula, old, new),
    }
}

fn rename_under(
    term: &Term,
    binder: Binder,
    names: &[String],
    body: &Term,
    old: &str,
    new: &str,
) -> Term {
    if names.iter().any(|name| name == old) {
        term.clone()
    } else {
        binder.bind(names.to_vec(), rename_free(body, old, new))
    }
}

///Add primes to `name` until it avoids every name in `avoid`.
fn prime(name: &str, avoid: &HashSet<&str>) -> String {
    let mut fresh = format!("{name}'");
    while avoid.contains(fresh.as_str()) {
        fresh.push('\'');
    }
    fresh
}

///Replace every free occurrence of `name` in `term` with `replacement`.
///
///When a binder's first declared name occurs free in `replacement`, the binder is first renamed to
///a primed name, fresh for the binder's other names and its body, so the replacement's variable
///doesn't get captured. Only the first declared name of
///a multi-parameter binder is protected like this.
///
///```
///# use dep2lambda::lambda::{Term, substitution::substitute};
///let f: Term = "lambda y.x(y)".parse()?;
///let g = substitute(&f, "x", &Term::var("y"));
///assert_eq!(g.to_string(), "lambda y'.y(y')");
///# Ok::<(), anyhow::Error>(())
///```
#[must_use]
pub fn substitute(term: &Term, name: &str, replacement: &Term) -> Term {
    match term {
        Term::Variable(v) if v == name => replacement.clone(),
        Term::Variable(_) | Term::Constant(_) => term.clone(),
        Term::Application { functor, arguments } => Term::apply(
            substitute(functor, name, replacement),
            arguments.iter().map(|x| substitute(x, name, replacement)),
        ),
        Term::Conjunction(operands) => Term::Conjunction(
            operands
                .iter()
                .map(|x| substitute(x, name, replacement))
                .collect(),
        ),
        Term::Implication(lhs, rhs) => Term::implies(
            substitute(lhs, name, replacement),
            substitute(rhs, name, replacement),
        ),
        Term::Negation(formula) => Term::negation(substitute(formula, name, replacement)),
        Term::Abstraction { parameters, body } => {
            substitute_under(term, Binder::Lambda, parameters, body, name, replacement)
        }
        Term::Quantifier {
            quantifier,
            vars,
            formula,
        } => substitute_under(
            term,
            Binder::Quantifier(*quantifier),
            vars,
            formula,
            name,
            replacement,
        ),
    }
}

fn substitute_under(
    term: &Term,
    binder: Binder,
    names: &[String],
    body: &Term,
    name: &str,
    replacement: &Term,
) -> Term {
    if names.iter().any(|x| x == name) {
        return term.clone();
    }

    let replacement_vars = free_vars(replacement);
    match names.first() {
        Some(head) if replacement_vars.contains(head.as_str()) => {
            let mut avoid = replacement_vars;
            avoid.extend(names.iter().map(String::as_str));
            avoid.extend(used_vars(body));
            avoid.extend(bound_vars(body));
            let fresh = prime(head, &avoid);
            let renamed = rename_binder(binder, names, body, head, &fresh);
            substitute(&renamed, name, replacement)
        }
        _ => binder.bind(names.to_vec(), substitute(body, name, replacement)),
    }
}
