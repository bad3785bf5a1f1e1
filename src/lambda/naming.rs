//! Deterministic renaming of every variable in a term to canonical names.
use ahash::HashMap;
use thiserror::Error;

use super::Term;

///An error from standardizing variable names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NamingError {
    ///The supply of fresh names ran dry.
    #[error("Ran out of fresh names while renaming {0}")]
    SupplyExhausted(Term),
}

///An endless supply of canonical names: `<1>`, `<2>`, `<3>`, ...
///
///The supply is a plain value, so callers who need names to be unique across several terms keep
///one around and pass it to each call of [`uniqueify_var_names`].
///
///```
///# use dep2lambda::lambda::naming::CanonicalNames;
///let names: Vec<_> = CanonicalNames::starting_at(4).take(2).collect();
///assert_eq!(names, ["<4>", "<5>"]);
///```
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CanonicalNames(u64);

impl CanonicalNames {
    ///A supply that starts at `<1>`.
    #[must_use]
    pub fn new() -> Self {
        CanonicalNames(1)
    }

    ///A supply that starts at `<start>`.
    #[must_use]
    pub fn starting_at(start: u64) -> Self {
        CanonicalNames(start)
    }
}

impl Default for CanonicalNames {
    fn default() -> Self {
        CanonicalNames::new()
    }
}

impl Iterator for CanonicalNames {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let name = format!("<{}>", self.0);
        self.0 = self.0.checked_add(1)?;
        Some(name)
    }
}

struct Renamer<'a, I> {
    supply: &'a mut I,
    renaming: HashMap<String, String>,
}

impl<I: Iterator<Item = String>> Renamer<'_, I> {
    fn name(&mut self, old: &str) -> Option<String> {
        if let Some(new) = self.renaming.get(old) {
            return Some(new.clone());
        }
        let new = self.supply.next()?;
        self.renaming.insert(old.to_string(), new.clone());
        Some(new)
    }

    fn names(&mut self, old: &[String]) -> Option<Vec<String>> {
        old.iter().map(|x| self.name(x)).collect()
    }

    fn rename(&mut self, term: &Term) -> Option<Term> {
        Some(match term {
            Term::Variable(name) => Term::Variable(self.name(name)?),
            Term::Constant(_) => term.clone(),
            Term::Abstraction { parameters, body } => {
                let parameters = self.names(parameters)?;
                Term::Abstraction {
                    parameters,
                    body: Box::new(self.rename(body)?),
                }
            }
            Term::Application { functor, arguments } => {
                let functor = self.rename(functor)?;
                let arguments = arguments
                    .iter()
                    .map(|x| self.rename(x))
                    .collect::<Option<Vec<_>>>()?;
                Term::apply(functor, arguments)
            }
            Term::Conjunction(operands) => Term::Conjunction(
                operands
                    .iter()
                    .map(|x| self.rename(x))
                    .collect::<Option<Vec<_>>>()?,
            ),
            Term::Implication(lhs, rhs) => {
                let lhs = self.rename(lhs)?;
                Term::implies(lhs, self.rename(rhs)?)
            }
            Term::Quantifier {
                quantifier,
                vars,
                formula,
            } => {
                let vars = self.names(vars)?;
                Term::Quantifier {
                    quantifier: *quantifier,
                    vars,
                    formula: Box::new(self.rename(formula)?),
                }
            }
            Term::Negation(formula) => Term::negation(self.rename(formula)?),
        })
    }
}

///Rename every distinct variable name in `term` to the next name from `supply`.
///
///Names are handed out greedily in the order they're first met: binder names before bodies,
///functors before arguments, and everything else left to right. Every later occurrence of a name
///reuses its replacement, even across unrelated binders, so this should only be used on terms
///where no live shadowing remains (e.g. after reduction). Constants are left alone.
///
///```
///# use dep2lambda::lambda::{Term, naming::{uniqueify_var_names, CanonicalNames}};
///let t: Term = "lambda x.\"P\"(x, y)".parse()?;
///let t = uniqueify_var_names(&t, &mut CanonicalNames::new())?;
///assert_eq!(t.to_string(), "lambda <1>.\"P\"(<1>, <2>)");
///# Ok::<(), anyhow::Error>(())
///```
///
///# Errors
///Returns [`NamingError::SupplyExhausted`] if `supply` runs out.
pub fn uniqueify_var_names(
    term: &Term,
    supply: &mut impl Iterator<Item = String>,
) -> Result<Term, NamingError> {
    let mut renamer = Renamer {
        supply,
        renaming: HashMap::default(),
    };
    renamer
        .rename(term)
        .ok_or_else(|| NamingError::SupplyExhausted(term.clone()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn first_occurrence_order() -> anyhow::Result<()> {
        let t: Term = "lambda f.f(y) & f(x)".parse()?;
        let mut supply = ["a", "b", "c", "d"].into_iter().map(String::from);
        let renamed = uniqueify_var_names(&t, &mut supply)?;
        assert_eq!(renamed, "lambda a.a(b) & a(c)".parse::<Term>()?);
        assert_eq!(supply.next().as_deref(), Some("d"));
        Ok(())
    }

    #[test]
    fn collapses_scopes_and_keeps_constants() -> anyhow::Result<()> {
        let t: Term = "(lambda x.x) & some x.\"x\"(x, e) & every e.~\"Q\"(e)".parse()?;
        let renamed = uniqueify_var_names(&t, &mut CanonicalNames::new())?;
        assert_eq!(
            renamed,
            "(lambda <1>.<1>) & some <1>.\"x\"(<1>, <2>) & every <2>.~\"Q\"(<2>)"
                .parse::<Term>()?
        );
        Ok(())
    }

    #[test]
    fn shared_supply() -> anyhow::Result<()> {
        let mut names = CanonicalNames::new();
        let a = uniqueify_var_names(&"lambda x.x".parse()?, &mut names)?;
        let b = uniqueify_var_names(&"lambda x.x".parse()?, &mut names)?;
        assert_eq!(a.to_string(), "lambda <1>.<1>");
        assert_eq!(b.to_string(), "lambda <2>.<2>");
        assert_eq!(names, CanonicalNames::starting_at(3));
        Ok(())
    }

    #[test]
    fn exhausted_supply() -> anyhow::Result<()> {
        let t: Term = "f(x)".parse()?;
        let mut supply = std::iter::once("a".to_string());
        assert_eq!(
            uniqueify_var_names(&t, &mut supply),
            Err(NamingError::SupplyExhausted(t.clone()))
        );
        Ok(())
    }
}
