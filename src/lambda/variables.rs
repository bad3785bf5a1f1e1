//! Free, bound and used variable analysis.
use ahash::HashSet;

use super::{Term, flatten::ShapeError};

///Every name occurring in `term` which is not bound by an enclosing binder.
#[must_use]
pub fn free_vars(term: &Term) -> HashSet<&str> {
    match term {
        Term::Variable(name) => HashSet::from_iter([name.as_str()]),
        Term::Constant(_) => HashSet::default(),
        Term::Application { functor, arguments } => {
            let mut vars = free_vars(functor);
            for argument in arguments {
                vars.extend(free_vars(argument));
            }
            vars
        }
        Term::Conjunction(operands) => operands.iter().flat_map(free_vars).collect(),
        Term::Implication(lhs, rhs) => {
            let mut vars = free_vars(lhs);
            vars.extend(free_vars(rhs));
            vars
        }
        Term::Negation(formula) => free_vars(formula),
        Term::Abstraction {
            parameters: names,
            body,
        }
        | Term::Quantifier {
            vars: names,
            formula: body,
            ..
        } => {
            let mut vars = free_vars(body);
            for name in names {
                vars.remove(name.as_str());
            }
            vars
        }
    }
}

///The names bound somewhere within `term`.
///
///This is deliberately loose: every composite node contributes both the free and the bound
///variables of its sub-terms, and each binder adds its own declared names. It is therefore a
///superset of the names bound in `term` and is only suitable for diagnostics. The one guarantee is
///that a binder's declared names are always included.
#[must_use]
pub fn bound_vars(term: &Term) -> HashSet<&str> {
    fn around<'a>(sub_terms: &[&'a Term]) -> HashSet<&'a str> {
        let mut vars = HashSet::default();
        for sub_term in sub_terms {
            vars.extend(free_vars(sub_term));
            vars.extend(bound_vars(sub_term));
        }
        vars
    }
    match term {
        Term::Variable(_) | Term::Constant(_) => HashSet::default(),
        Term::Application { functor, arguments } => {
            let sub_terms: Vec<&Term> = std::iter::once(functor.as_ref())
                .chain(arguments.iter())
                .collect();
            around(&sub_terms)
        }
        Term::Conjunction(operands) => around(&operands.iter().collect::<Vec<_>>()),
        Term::Implication(lhs, rhs) => around(&[lhs.as_ref(), rhs.as_ref()]),
        Term::Negation(formula) => around(&[formula.as_ref()]),
        Term::Abstraction {
            parameters: names,
            body,
        }
        | Term::Quantifier {
            vars: names,
            formula: body,
            ..
        } => {
            let mut vars = around(&[body.as_ref()]);
            vars.extend(names.iter().map(String::as_str));
            vars
        }
    }
}

///Every name that is referenced by a [`Term::Variable`] leaf.
///
///The declared names of binders do not count, so `lambda x.y` only uses `y`.
#[must_use]
pub fn used_vars(term: &Term) -> HashSet<&str> {
    match term {
        Term::Variable(name) => HashSet::from_iter([name.as_str()]),
        Term::Constant(_) => HashSet::default(),
        Term::Application { functor, arguments } => {
            let mut vars = used_vars(functor);
            for argument in arguments {
                vars.extend(used_vars(argument));
            }
            vars
        }
        Term::Conjunction(operands) => operands.iter().flat_map(used_vars).collect(),
        Term::Implication(lhs, rhs) => {
            let mut vars = used_vars(lhs);
            vars.extend(used_vars(rhs));
            vars
        }
        Term::Negation(formula) => used_vars(formula),
        Term::Abstraction { body, .. } => used_vars(body),
        Term::Quantifier { formula, .. } => used_vars(formula),
    }
}

///Checks that no binder in `term` has its names shadowed further down.
///
///A declared name passes if its body never uses it, or if it occurs free in the body. A name that
///is only used under a nested binder re-declaring it is shadowed.
///
///# Errors
///Returns [`ShapeError::ShadowedVariable`] naming the first binder that violates this.
pub fn assert_unique_vars(term: &Term) -> Result<(), ShapeError> {
    match term {
        Term::Variable(_) | Term::Constant(_) => Ok(()),
        Term::Application { functor, arguments } => {
            assert_unique_vars(functor)?;
            arguments.iter().try_for_each(assert_unique_vars)
        }
        Term::Conjunction(operands) => operands.iter().try_for_each(assert_unique_vars),
        Term::Implication(lhs, rhs) => {
            assert_unique_vars(lhs)?;
            assert_unique_vars(rhs)
        }
        Term::Negation(formula) => assert_unique_vars(formula),
        Term::Abstraction {
            parameters: names,
            body,
        }
        | Term::Quantifier {
            vars: names,
            formula: body,
            ..
        } => {
            let used = used_vars(body);
            let free = free_vars(body);
            if let Some(name) = names
                .iter()
                .find(|name| used.contains(name.as_str()) && !free.contains(name.as_str()))
            {
                return Err(ShapeError::ShadowedVariable {
                    name: name.clone(),
                    term: term.clone(),
                });
            }
            assert_unique_vars(body)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn set<'a>(names: &[&'a str]) -> HashSet<&'a str> {
        names.iter().copied().collect()
    }

    #[test]
    fn free_variables() -> anyhow::Result<()> {
        let term: Term = "lambda x.f(x, y) & some z.\"P\"(z, w)".parse()?;
        assert_eq!(free_vars(&term), set(&["f", "y", "w"]));

        let term: Term = "(lambda x.x)(x)".parse()?;
        assert_eq!(free_vars(&term), set(&["x"]));

        let term: Term = "~(a -> every a b.b(a, c))".parse()?;
        assert_eq!(free_vars(&term), set(&["a", "c"]));

        assert!(free_vars(&Term::constant("P")).is_empty());
        Ok(())
    }

    #[test]
    fn bound_variables() -> anyhow::Result<()> {
        let term: Term = "lambda x.y".parse()?;
        assert_eq!(bound_vars(&term), set(&["x", "y"]));

        let term: Term = "f(lambda x y.x, some e.\"P\"(e))".parse()?;
        assert_eq!(bound_vars(&term), set(&["f", "x", "y", "e"]));

        assert!(bound_vars(&Term::var("x")).is_empty());
        Ok(())
    }

    #[test]
    fn used_variables() -> anyhow::Result<()> {
        let term: Term = "lambda x.y".parse()?;
        assert_eq!(used_vars(&term), set(&["y"]));

        let term: Term = "lambda x.x(lambda z.\"c\")".parse()?;
        assert_eq!(used_vars(&term), set(&["x"]));
        Ok(())
    }

    #[test]
    fn unique_variables() -> anyhow::Result<()> {
        for ok in [
            "lambda x.f(x)",
            "lambda x.y",
            "lambda x.x & lambda x.x",
            "lambda x.x(lambda x.x)",
            "some e.\"P\"(e) & every x.\"Q\"(x) -> \"R\"(x)",
        ] {
            let term: Term = ok.parse()?;
            assert_eq!(assert_unique_vars(&term), Ok(()), "{ok}");
        }

        let term: Term = "lambda x.lambda x.x".parse()?;
        let Err(ShapeError::ShadowedVariable { name, .. }) = assert_unique_vars(&term) else {
            panic!("lambda x.lambda x.x shadows x");
        };
        assert_eq!(name, "x");

        let term: Term = "f(some e.every e.\"P\"(e))".parse()?;
        assert!(assert_unique_vars(&term).is_err());
        Ok(())
    }
}
