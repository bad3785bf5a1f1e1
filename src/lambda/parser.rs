//! Parsing terms from the same syntax that [`Term`]'s `Display` prints.
//!
//! ```text
//! term     := conj ("->" term)?
//! conj     := neg ("&" neg)*
//! neg      := "~"* app
//! app      := atom ("(" [term ("," term)*] ")")*
//! atom     := binder | constant | variable | "(" term ")"
//! binder   := ("lambda" | "some" | "every") variable+ "." term
//! constant := '"' (char | '\"' | '\\')* '"'
//! variable := (ident | "<" digits ">") "'"*
//! ```
use chumsky::prelude::*;
use std::str::FromStr;
use thiserror::Error;

use super::{Binder, Quantifier, Term};

const KEYWORDS: [&str; 3] = ["lambda", "some", "every"];

///Unable to parse a term.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TermParseError(String);

impl From<Vec<Rich<'_, char>>> for TermParseError {
    fn from(value: Vec<Rich<'_, char>>) -> Self {
        TermParseError(
            value
                .iter()
                .map(std::string::ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

fn name<'src>() -> impl Parser<'src, &'src str, String, extra::Err<Rich<'src, char>>> + Clone {
    choice((
        text::ascii::ident()
            .filter(|name: &&str| !KEYWORDS.contains(name))
            .then(just('\'').repeated())
            .to_slice(),
        just('<')
            .then(text::int(10))
            .then(just('>'))
            .then(just('\'').repeated())
            .to_slice(),
    ))
    .map(str::to_string)
    .labelled("variable")
}

fn term_parser<'src>() -> impl Parser<'src, &'src str, Term, extra::Err<Rich<'src, char>>> + Clone
{
    recursive(|term| {
        let binder = choice((
            just("lambda").to(Binder::Lambda),
            just("some").to(Binder::Quantifier(Quantifier::Existential)),
            just("every").to(Binder::Quantifier(Quantifier::Universal)),
        ))
        .then_ignore(text::whitespace().at_least(1))
        .then(name().padded().repeated().at_least(1).collect::<Vec<_>>())
        .then_ignore(just('.'))
        .then(term.clone())
        .map(|((binder, names), body)| binder.bind(names, body))
        .labelled("binder");

        let constant = none_of("\\\"")
            .or(just('\\').ignore_then(one_of("\\\"")))
            .repeated()
            .collect::<String>()
            .delimited_by(just('"'), just('"'))
            .map(Term::Constant)
            .labelled("constant");

        let atom = choice((
            binder,
            constant,
            name().map(Term::Variable),
            term.clone().delimited_by(just('('), just(')')),
        ))
        .padded();

        let arguments = term
            .clone()
            .separated_by(just(','))
            .collect::<Vec<_>>()
            .padded()
            .delimited_by(just('('), just(')'))
            .padded();

        let application = atom.foldl(arguments.repeated(), |functor, arguments| {
            Term::apply(functor, arguments)
        });

        let negation = just('~')
            .padded()
            .repeated()
            .foldr(application, |_, formula| Term::negation(formula));

        let conjunction = negation
            .clone()
            .then(
                just('&')
                    .padded()
                    .ignore_then(negation)
                    .repeated()
                    .collect::<Vec<_>>(),
            )
            .map(|(first, rest)| {
                if rest.is_empty() {
                    first
                } else {
                    Term::Conjunction(std::iter::once(first).chain(rest).collect())
                }
            });

        conjunction
            .then(just("->").padded().ignore_then(term).or_not())
            .map(|(lhs, rhs)| match rhs {
                Some(rhs) => Term::implies(lhs, rhs),
                None => lhs,
            })
    })
}

impl FromStr for Term {
    type Err = TermParseError;

    ///Parse a term, e.g. `lambda x.some e."P"(e) & "Q"(e, x)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(term_parser()
            .padded()
            .then_ignore(end())
            .parse(s)
            .into_result()?)
    }
}
