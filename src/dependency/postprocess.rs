//! Rewrites applied to composed terms in semantic form.
use log::debug;
use thiserror::Error;

use super::PipelineError;
use crate::lambda::{Quantifier, Term, flatten::into_semantic_form};

///An error from a post-processing rewrite.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostProcessError {
    #[error("No 'conj' predicate matched in {0}")]
    NoConjPredicate(Term),
    #[error("No 'arg' predicate matched in {0}")]
    NoArgPredicate(Term),
    ///The body under the abstraction and its quantifiers isn't a conjunction.
    #[error("{0} is not a conjunction")]
    NotAConjunction(Term),
    #[error("No post-processing step is defined for the relation {0}")]
    UnknownRelation(String),
}

///Applies relation-specific rewrites to terms in semantic form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostProcessor;

impl PostProcessor {
    ///Flatten `term` and check that it is in semantic form.
    ///
    ///# Errors
    ///Returns [`PipelineError::Shape`] if `term` can't be brought into semantic form.
    pub fn flatten_and_validate(&self, term: &Term) -> Result<Term, PipelineError> {
        Ok(into_semantic_form(term)?)
    }

    ///Bring `term` into semantic form and apply the rewrite for `relation`.
    ///
    ///The only rewrite is for `conj`: a predicate `"conj"(h, d1, d2)` is dropped, and every
    ///`argN(e, h)` is split into `argN(e, d1)` and `argN(e, d2)`.
    ///
    ///```
    ///# use dep2lambda::{dependency::PostProcessor, lambda::Term};
    ///let t: Term = r#"lambda e."run"(e) & "conj"(h, a, b) & "arg1"(e, h)"#.parse()?;
    ///assert_eq!(
    ///    PostProcessor.process_by_relation("conj", &t)?.to_string(),
    ///    r#"lambda e."run"(e) & "arg1"(e, a) & "arg1"(e, b)"#
    ///);
    ///# Ok::<(), anyhow::Error>(())
    ///```
    ///
    ///# Errors
    ///Returns a [`PostProcessError`] if the rewrite doesn't apply or `relation` has none, or a
    ///[`PipelineError::Shape`] if `term` isn't in semantic form.
    pub fn process_by_relation(&self, relation: &str, term: &Term) -> Result<Term, PipelineError> {
        let term = self.flatten_and_validate(term)?;
        match relation {
            "conj" => split_coordination(&term),
            _ => Err(PostProcessError::UnknownRelation(relation.to_string()).into()),
        }
    }
}

fn is_predicate(term: &Term, symbol: impl Fn(&str) -> bool, arity: usize) -> bool {
    match term {
        Term::Application { functor, arguments } => {
            matches!(functor.as_ref(), Term::Constant(s) if symbol(s.as_str())) && arguments.len() == arity
        }
        _ => false,
    }
}

fn split_coordination(term: &Term) -> Result<Term, PipelineError> {
    let Term::Abstraction { parameters, body } = term else {
        return Err(PostProcessError::NotAConjunction(term.clone()).into());
    };
    let mut quantifiers: Vec<(Quantifier, &[String])> = vec![];
    let mut inner = body.as_ref();
    while let Term::Quantifier {
        quantifier,
        vars,
        formula,
    } = inner
    {
        quantifiers.push((*quantifier, vars.as_slice()));
        inner = formula;
    }
    let Term::Conjunction(operands) = inner else {
        return Err(PostProcessError::NotAConjunction(term.clone()).into());
    };

    let conj = operands
        .iter()
        .find(|x| is_predicate(x, |s| s == "conj", 3))
        .ok_or_else(|| PostProcessError::NoConjPredicate(term.clone()))?;
    let Term::Application { arguments, .. } = conj else {
        return Err(PostProcessError::NoConjPredicate(term.clone()).into());
    };
    let [head, first, second] = arguments.as_slice() else {
        return Err(PostProcessError::NoConjPredicate(term.clone()).into());
    };

    let mut replaced = false;
    let mut rewritten = vec![];
    for operand in operands {
        if operand == conj {
            continue;
        }
        match operand {
            Term::Application { functor, arguments }
                if is_predicate(operand, |s| s.starts_with("arg"), 2)
                    && &arguments[1] == head =>
            {
                replaced = true;
                for dependent in [first, second] {
                    rewritten.push(Term::apply(
                        functor.as_ref().clone(),
                        [arguments[0].clone(), dependent.clone()],
                    ));
                }
            }
            _ => rewritten.push(operand.clone()),
        }
    }
    if !replaced {
        return Err(PostProcessError::NoArgPredicate(term.clone()).into());
    }
    debug!("Split {head} into {first} and {second}");

    let mut body = Term::conjunction(rewritten)?;
    for (quantifier, vars) in quantifiers.into_iter().rev() {
        body = Term::Quantifier {
            quantifier,
            vars: vars.to_vec(),
            formula: Box::new(body),
        };
    }
    Ok(Term::Abstraction {
        parameters: parameters.clone(),
        body: Box::new(body),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn coordination() -> anyhow::Result<()> {
        let t: Term = r#"lambda e.some h a b."run"(e) & "arg1"(e, h) & "conj"(h, a, b) & "Ann"(a) & "arg2"(e, h) & "Bo"(b)"#
            .parse()?;
        assert_eq!(
            PostProcessor.process_by_relation("conj", &t)?,
            r#"lambda e.some h a b."run"(e) & "arg1"(e, a) & "arg1"(e, b) & "Ann"(a) & "arg2"(e, a) & "arg2"(e, b) & "Bo"(b)"#
                .parse::<Term>()?
        );

        //The term is flattened first.
        let t: Term =
            r#"lambda e."run"(e) & ("conj"(h, a, b) & some x."arg1"(e, h) & "P"(x))"#.parse()?;
        assert_eq!(
            PostProcessor.process_by_relation("conj", &t)?.to_string(),
            r#"lambda e.some x."run"(e) & "arg1"(e, a) & "arg1"(e, b) & "P"(x)"#
        );
        Ok(())
    }

    #[test]
    fn failed_coordination() -> anyhow::Result<()> {
        let t: Term = r#"lambda e."run"(e) & "arg1"(e, h)"#.parse()?;
        assert!(matches!(
            PostProcessor.process_by_relation("conj", &t),
            Err(PipelineError::PostProcess(PostProcessError::NoConjPredicate(_)))
        ));

        let t: Term = r#"lambda e."run"(e) & "conj"(h, a, b) & "arg1"(e, a)"#.parse()?;
        assert!(matches!(
            PostProcessor.process_by_relation("conj", &t),
            Err(PipelineError::PostProcess(PostProcessError::NoArgPredicate(_)))
        ));

        let t: Term = r#"lambda e."conj"(h, a, b)"#.parse()?;
        assert!(matches!(
            PostProcessor.process_by_relation("conj", &t),
            Err(PipelineError::PostProcess(PostProcessError::NotAConjunction(_)))
        ));

        let t: Term = r#"lambda e."run"(e) & "arg1"(e, h)"#.parse()?;
        assert!(matches!(
            PostProcessor.process_by_relation("acl", &t),
            Err(PipelineError::PostProcess(PostProcessError::UnknownRelation(label))) if label == "acl"
        ));
        Ok(())
    }

    #[test]
    fn validation() -> anyhow::Result<()> {
        let t: Term = r#"lambda e."run"(e) & "arg1"(e, "Ann")"#.parse()?;
        assert!(matches!(
            PostProcessor.flatten_and_validate(&t),
            Err(PipelineError::Shape(_))
        ));
        let t: Term = r#"lambda e."run"(e) & ("P"(e) & "Q"(e))"#.parse()?;
        assert_eq!(
            PostProcessor.flatten_and_validate(&t)?.to_string(),
            r#"lambda e."run"(e) & "P"(e) & "Q"(e)"#
        );
        Ok(())
    }
}
