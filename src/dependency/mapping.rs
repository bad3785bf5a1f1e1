//! The lambda terms given to the nodes of a binarized tree.
//!
//! A relation's term takes the composed terms of its left child (the head side) and its right child
//! (the dependent) as its first two arguments.
use super::{
    PipelineError,
    tree::{DepTree, Ontology},
};
use crate::lambda::Term;

///Supplies the term of each node of a binarized [`DepTree`].
pub trait LambdaMapping {
    ///The term of `node`.
    ///
    ///# Errors
    ///Returns [`PipelineError::UnknownRelation`] for labels the mapping doesn't know.
    fn term(&self, node: &DepTree) -> Result<Term, PipelineError>;
}

impl<M: LambdaMapping + ?Sized> LambdaMapping for &M {
    fn term(&self, node: &DepTree) -> Result<Term, PipelineError> {
        (**self).term(node)
    }
}

impl<M: LambdaMapping + ?Sized> LambdaMapping for Box<M> {
    fn term(&self, node: &DepTree) -> Result<Term, PipelineError> {
        (**self).term(node)
    }
}

fn template(s: &str) -> Result<Term, PipelineError> {
    Ok(s.parse()?)
}

///`lambda x.P(x)` for the predicate `P`.
fn predicate(symbol: String) -> Result<Term, PipelineError> {
    Ok(Term::abstraction(
        ["x"],
        Term::apply(Term::constant(symbol), [Term::var("x")]),
    )?)
}

fn unknown(node: &DepTree) -> PipelineError {
    PipelineError::UnknownRelation(node.prefixed_label())
}

///A neo-Davidsonian mapping for a handful of relations, where every word is a predicate over
///events or entities and arguments are linked by `arg1` and `arg2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventMapping;

impl LambdaMapping for EventMapping {
    fn term(&self, node: &DepTree) -> Result<Term, PipelineError> {
        if node.is_word() {
            return predicate(node.prefixed_label());
        }
        match node.label() {
            "nsubj" => template(r#"lambda f g z.f(z) & g(x) & "arg1"(z, x)"#),
            "dobj" => template(r#"lambda f g z.f(z) & g(x) & "arg2"(z, x)"#),
            "punct" => template("lambda f g x.f(x)"),
            "mark" => template(r#"lambda f g e1.f(e2) & "arg2"(e1, e2)"#),
            _ => Err(unknown(node)),
        }
    }
}

///A mapping with generalized quantifiers over Universal Dependencies v2 relations.
///
///Words denote according to their [`Ontology`]: events introduce an existentially quantified event
///variable, individuals are type-lifted, and everything else is a one-place predicate. Subjects and
///objects link events to participants with `ag` and `th`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuantificationalMapping;

impl LambdaMapping for QuantificationalMapping {
    fn term(&self, node: &DepTree) -> Result<Term, PipelineError> {
        let label = node.label();
        if node.is_word() {
            let symbol = Term::constant(label);
            return Ok(match node.ontology() {
                Some(Ontology::Event) => Term::abstraction(
                    ["f"],
                    Term::exists(
                        ["e"],
                        Term::conjunction([
                            Term::apply(symbol, [Term::var("e")]),
                            Term::apply(Term::var("f"), [Term::var("e")]),
                        ])?,
                    )?,
                )?,
                Some(Ontology::Individual) => {
                    Term::abstraction(["f"], Term::apply(Term::var("f"), [symbol]))?
                }
                None => predicate(label.to_string())?,
            });
        }
        match label {
            "det:univ" => template("lambda f _ P.every x.f(x) -> P(x)"),
            "det:exis" => template("lambda f _ P.some x.f(x) & P(x)"),
            "nsubj" => template(r#"lambda P Q f.Q(lambda x.P(lambda e.f(e) & "ag"(e, x)))"#),
            "obj" => template(r#"lambda P Q f.Q(lambda x.P(lambda e.f(e) & "th"(e, x)))"#),
            "neg" => template("lambda P _ f.~P(f)"),
            "advmod" => template("lambda P Q f.P(lambda e.Q(e) & f(e))"),
            "conj" => template("lambda P Q f.P(f) & Q(f)"),
            "aux" | "cc" | "cop" => template("lambda P Q.P"),
            _ => Err(unknown(node)),
        }
    }
}
