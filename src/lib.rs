//! Lambda terms and their composition over dependency parses.
//!
//! [`lambda`] holds the term language: parsing, printing, capture-avoiding substitution,
//! beta-reduction, canonical renaming and flattening into semantic form. [`dependency`] builds
//! terms for whole sentences from their dependency trees.

pub mod dependency;
pub mod lambda;

pub use dependency::{DepTree, PipelineConfig, PipelineError, Token, Transformer};
pub use lambda::{
    Quantifier, Term, TermError,
    flatten::{flatten, into_semantic_form, validate_semantic_form},
    naming::{CanonicalNames, uniqueify_var_names},
    parser::TermParseError,
    reduction::{DEFAULT_MAX_STEPS, beta_reduce},
    substitution::{alpha_rename, substitute},
    variables::{bound_vars, free_vars, used_vars},
};
