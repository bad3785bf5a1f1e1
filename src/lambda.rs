//! The term model: an untyped lambda calculus with multi-parameter abstraction, conjunction,
//! implication, negation and restricted quantifiers.
//!
//! Terms are immutable value trees. Every transformation in the submodules takes a `&Term` and
//! builds a new tree.
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;

pub mod flatten;
pub mod naming;
pub mod parser;
pub mod reduction;
#[cfg(feature = "sampling")]
pub mod sampling;
pub mod substitution;
pub mod variables;

///An error from constructing a malformed [`Term`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TermError {
    ///A binder was given no names to bind.
    #[error("{0} must bind at least one variable")]
    EmptyBinder(&'static str),
    ///A conjunction was given fewer than two operands.
    #[error("A conjunction requires at least 2 operands, but got {0}")]
    TooFewOperands(usize),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
///The two kinds of quantifier.
pub enum Quantifier {
    ///Binds its variables existentially.
    Existential,
    ///Binds its variables universally.
    Universal,
}

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
///A lambda term.
///
///Equality is structural and *not* alpha-equivalence: `lambda x.x` and `lambda y.y` are different
///terms.
pub enum Term {
    ///A reference to a bound or free name.
    Variable(String),
    ///An opaque symbol which is never substituted or renamed. It prints in double quotes, with `"`
    ///and `\` escaped by a backslash.
    Constant(String),
    ///Sugar for nested single-parameter abstractions, left to right.
    Abstraction {
        parameters: Vec<String>,
        body: Box<Term>,
    },
    ///`functor` applied to `arguments` left to right.
    Application {
        functor: Box<Term>,
        arguments: Vec<Term>,
    },
    ///n-ary logical and, with at least two operands.
    Conjunction(Vec<Term>),
    ///Material implication.
    Implication(Box<Term>, Box<Term>),
    ///An existential or universal binder over one or more variables.
    Quantifier {
        quantifier: Quantifier,
        vars: Vec<String>,
        formula: Box<Term>,
    },
    ///Logical not.
    Negation(Box<Term>),
}

///The kind of node that declares names.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum Binder {
    Lambda,
    Quantifier(Quantifier),
}

impl Binder {
    ///Rebuild a binder of this kind.
    pub(crate) fn bind(self, names: Vec<String>, body: Term) -> Term {
        match self {
            Binder::Lambda => Term::Abstraction {
                parameters: names,
                body: Box::new(body),
            },
            Binder::Quantifier(quantifier) => Term::Quantifier {
                quantifier,
                vars: names,
                formula: Box::new(body),
            },
        }
    }
}

fn collect_names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Vec<String> {
    names.into_iter().map(Into::into).collect()
}

impl Term {
    ///A variable.
    #[must_use]
    pub fn var(name: impl Into<String>) -> Term {
        Term::Variable(name.into())
    }

    ///A constant.
    #[must_use]
    pub fn constant(symbol: impl Into<String>) -> Term {
        Term::Constant(symbol.into())
    }

    ///A multi-parameter abstraction.
    ///
    ///```
    ///# use dep2lambda::lambda::Term;
    ///let id = Term::abstraction(["x"], Term::var("x"))?;
    ///assert_eq!(id.to_string(), "lambda x.x");
    ///assert!(Term::abstraction(Vec::<String>::new(), Term::var("x")).is_err());
    ///# Ok::<(), anyhow::Error>(())
    ///```
    ///
    ///# Errors
    ///Returns [`TermError::EmptyBinder`] if there are no parameters.
    pub fn abstraction<S: Into<String>>(
        parameters: impl IntoIterator<Item = S>,
        body: Term,
    ) -> Result<Term, TermError> {
        let parameters = collect_names(parameters);
        if parameters.is_empty() {
            return Err(TermError::EmptyBinder("An abstraction"));
        }
        Ok(Term::Abstraction {
            parameters,
            body: Box::new(body),
        })
    }

    ///Apply `functor` to `arguments`.
    #[must_use]
    pub fn apply(functor: Term, arguments: impl IntoIterator<Item = Term>) -> Term {
        Term::Application {
            functor: Box::new(functor),
            arguments: arguments.into_iter().collect(),
        }
    }

    ///An n-ary conjunction.
    ///
    ///# Errors
    ///Returns [`TermError::TooFewOperands`] if there are fewer than two operands.
    pub fn conjunction(operands: impl IntoIterator<Item = Term>) -> Result<Term, TermError> {
        let operands: Vec<Term> = operands.into_iter().collect();
        if operands.len() < 2 {
            return Err(TermError::TooFewOperands(operands.len()));
        }
        Ok(Term::Conjunction(operands))
    }

    ///`lhs -> rhs`
    #[must_use]
    pub fn implies(lhs: Term, rhs: Term) -> Term {
        Term::Implication(Box::new(lhs), Box::new(rhs))
    }

    ///Existentially quantify `formula` over `vars`.
    ///
    ///# Errors
    ///Returns [`TermError::EmptyBinder`] if there are no variables.
    pub fn exists<S: Into<String>>(
        vars: impl IntoIterator<Item = S>,
        formula: Term,
    ) -> Result<Term, TermError> {
        Term::quantify(Quantifier::Existential, vars, formula)
    }

    ///Universally quantify `formula` over `vars`.
    ///
    ///# Errors
    ///Returns [`TermError::EmptyBinder`] if there are no variables.
    pub fn forall<S: Into<String>>(
        vars: impl IntoIterator<Item = S>,
        formula: Term,
    ) -> Result<Term, TermError> {
        Term::quantify(Quantifier::Universal, vars, formula)
    }

    ///Quantify `formula` over `vars` with `quantifier`.
    ///
    ///# Errors
    ///Returns [`TermError::EmptyBinder`] if there are no variables.
    pub fn quantify<S: Into<String>>(
        quantifier: Quantifier,
        vars: impl IntoIterator<Item = S>,
        formula: Term,
    ) -> Result<Term, TermError> {
        let vars = collect_names(vars);
        if vars.is_empty() {
            return Err(TermError::EmptyBinder(match quantifier {
                Quantifier::Existential => "An existential quantifier",
                Quantifier::Universal => "A universal quantifier",
            }));
        }
        Ok(Term::Quantifier {
            quantifier,
            vars,
            formula: Box::new(formula),
        })
    }

    ///Negate `formula`.
    #[must_use]
    pub fn negation(formula: Term) -> Term {
        Term::Negation(Box::new(formula))
    }

    ///Check if the term declares names (an abstraction or a quantifier).
    #[must_use]
    pub fn is_binder(&self) -> bool {
        self.as_binder().is_some()
    }

    pub(crate) fn as_binder(&self) -> Option<(Binder, &[String], &Term)> {
        match self {
            Term::Abstraction { parameters, body } => Some((Binder::Lambda, parameters, body)),
            Term::Quantifier {
                quantifier,
                vars,
                formula,
            } => Some((Binder::Quantifier(*quantifier), vars, formula)),
            _ => None,
        }
    }

    ///Split a multi-parameter abstraction into the name of its first parameter and the rest.
    ///
    ///`lambda x y.f(x, y)` splits into `x` and `lambda y.f(x, y)`, while `lambda x.f(x)` splits
    ///into `x` and the bare body `f(x)`. Returns `None` if the term is not an abstraction.
    #[must_use]
    pub fn split_abstraction(&self) -> Option<(&str, Term)> {
        let Term::Abstraction { parameters, body } = self else {
            return None;
        };
        let (first, rest) = parameters.split_first()?;
        let rest = if rest.is_empty() {
            body.as_ref().clone()
        } else {
            Term::Abstraction {
                parameters: rest.to_vec(),
                body: body.clone(),
            }
        };
        Some((first.as_str(), rest))
    }

    ///How tightly the printed form of the term binds. Binders extend as far to the right as
    ///possible, so they bind loosest.
    fn precedence(&self) -> u8 {
        match self {
            Term::Abstraction { .. } | Term::Quantifier { .. } => 0,
            Term::Implication(..) => 1,
            Term::Conjunction(_) => 2,
            Term::Negation(_) => 3,
            Term::Variable(_) | Term::Constant(_) | Term::Application { .. } => 4,
        }
    }

    fn fmt_at(&self, f: &mut std::fmt::Formatter<'_>, min: u8) -> std::fmt::Result {
        if self.precedence() < min {
            write!(f, "(")?;
            self.fmt_at(f, 0)?;
            return write!(f, ")");
        }
        match self {
            Term::Variable(name) => write!(f, "{name}"),
            Term::Constant(symbol) => {
                write!(f, "\"")?;
                for c in symbol.chars() {
                    if matches!(c, '"' | '\\') {
                        write!(f, "\\")?;
                    }
                    write!(f, "{c}")?;
                }
                write!(f, "\"")
            }
            Term::Abstraction { parameters, body } => {
                write!(f, "lambda {}.", parameters.join(" "))?;
                body.fmt_at(f, 0)
            }
            Term::Quantifier {
                quantifier,
                vars,
                formula,
            } => {
                let keyword = match quantifier {
                    Quantifier::Existential => "some",
                    Quantifier::Universal => "every",
                };
                write!(f, "{keyword} {}.", vars.join(" "))?;
                formula.fmt_at(f, 0)
            }
            Term::Application { functor, arguments } => {
                functor.fmt_at(f, 4)?;
                write!(f, "(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    argument.fmt_at(f, 0)?;
                }
                write!(f, ")")
            }
            Term::Conjunction(operands) => {
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, " & ")?;
                    }
                    operand.fmt_at(f, 3)?;
                }
                Ok(())
            }
            Term::Implication(lhs, rhs) => {
                lhs.fmt_at(f, 2)?;
                write!(f, " -> ")?;
                rhs.fmt_at(f, 1)
            }
            Term::Negation(formula) => {
                write!(f, "~")?;
                formula.fmt_at(f, 3)
            }
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_at(f, 0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn equality_is_structural() -> anyhow::Result<()> {
        let x = Term::abstraction(["x"], Term::var("x"))?;
        let y = Term::abstraction(["y"], Term::var("y"))?;
        assert_ne!(x, y);
        assert_eq!(x, Term::abstraction(["x"], Term::var("x"))?);

        assert_ne!(Term::var("P"), Term::constant("P"));
        assert_eq!(Term::constant("P"), Term::constant("P"));

        let some = Term::exists(["x"], Term::var("x"))?;
        let every = Term::forall(["x"], Term::var("x"))?;
        assert_ne!(some, every);

        assert_ne!(
            Term::abstraction(["x", "y"], Term::var("x"))?,
            Term::abstraction(["x"], Term::var("x"))?
        );
        assert_ne!(
            Term::apply(Term::var("f"), [Term::var("a"), Term::var("b")]),
            Term::apply(Term::var("f"), [Term::var("b"), Term::var("a")])
        );
        Ok(())
    }

    #[test]
    fn malformed_construction() {
        assert_eq!(
            Term::abstraction(Vec::<String>::new(), Term::var("x")),
            Err(TermError::EmptyBinder("An abstraction"))
        );
        assert_eq!(
            Term::conjunction([Term::var("x")]),
            Err(TermError::TooFewOperands(1))
        );
        assert!(Term::exists(Vec::<&str>::new(), Term::var("x")).is_err());
        assert!(Term::forall(Vec::<&str>::new(), Term::var("x")).is_err());
    }

    #[test]
    fn splitting() -> anyhow::Result<()> {
        let body = Term::apply(Term::var("x"), [Term::var("y")]);
        let f = Term::abstraction(["x", "y"], body.clone())?;
        let (name, rest) = f.split_abstraction().expect("is an abstraction");
        assert_eq!(name, "x");
        assert_eq!(rest, Term::abstraction(["y"], body.clone())?);

        let (name, rest) = rest.split_abstraction().expect("is an abstraction");
        assert_eq!(name, "y");
        assert_eq!(rest, body);
        assert!(body.split_abstraction().is_none());
        Ok(())
    }

    #[test]
    fn printing() -> anyhow::Result<()> {
        let conj = Term::conjunction([
            Term::apply(Term::constant("P1"), [Term::var("x")]),
            Term::negation(Term::apply(Term::var("g"), [Term::var("x")])),
        ])?;
        let f = Term::abstraction(["f", "g"], conj.clone())?;
        assert_eq!(f.to_string(), "lambda f g.\"P1\"(x) & ~g(x)");

        let nested = Term::conjunction([Term::var("a"), conj.clone()])?;
        assert_eq!(nested.to_string(), "a & (\"P1\"(x) & ~g(x))");

        let redex = Term::apply(f, [Term::var("y")]);
        assert_eq!(redex.to_string(), "(lambda f g.\"P1\"(x) & ~g(x))(y)");

        let implication = Term::forall(
            ["x"],
            Term::implies(
                Term::implies(Term::var("a"), Term::var("b")),
                Term::implies(Term::var("c"), Term::var("d")),
            ),
        )?;
        assert_eq!(implication.to_string(), "every x.(a -> b) -> c -> d");

        assert_eq!(
            Term::constant(r#"say "hi" \ bye"#).to_string(),
            r#""say \"hi\" \\ bye""#
        );

        let negated = Term::negation(Term::exists(["e"], conj)?);
        assert_eq!(negated.to_string(), "~(some e.\"P1\"(x) & ~g(x))");
        Ok(())
    }
}
