//! Composing lambda terms over dependency parses.
//!
//! A dependency parse arrives as a JSON [`Token`] tree, is turned into a [`DepTree`] of words and
//! relations, preprocessed, binarized by [`RelationPriority`] and then composed bottom-up by a
//! [`Transformer`]: every node is given a term by a [`LambdaMapping`] and each binary node
//! beta-reduces its own term applied to the terms of its two children.
//!
//!```
//!# use dep2lambda::dependency::{
//!#     DepTree, PipelineConfig, Token, Transformer, mapping::EventMapping,
//!# };
//!let token = Token::from_json(r#"{
//!    "text": "acquired", "dep": "ROOT", "pos": "VERB",
//!    "children": [{"text": "Disney", "dep": "nsubj", "pos": "PROPN"}]
//!}"#)?;
//!let tree = DepTree::from_token(&token);
//!let mut transformer = Transformer::new(EventMapping, PipelineConfig::default());
//!assert_eq!(
//!    transformer.semantics(&tree)?.to_string(),
//!    r#"lambda <1>."w-acquired"(<1>) & "w-Disney"(<2>) & "arg1"(<1>, <2>)"#
//!);
//!# Ok::<(), anyhow::Error>(())
//!```
use ahash::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lambda::{
    TermError, flatten::ShapeError, naming::NamingError, parser::TermParseError,
    reduction::{DEFAULT_MAX_STEPS, ReductionError},
};

pub mod mapping;
pub mod postprocess;
pub mod preprocess;
pub mod priority;
pub mod transformer;
pub mod tree;

pub use mapping::LambdaMapping;
pub use postprocess::{PostProcessError, PostProcessor};
pub use priority::RelationPriority;
pub use transformer::{LambdaTree, Transformer};
pub use tree::{DepTree, NodeKind, Ontology, Token};

///An error from any stage of composing the semantics of a dependency tree.
#[derive(Debug, Error)]
pub enum PipelineError {
    ///Composition needs every node to have 0 or 2 children.
    #[error("The tree has not been binarized: {label} has {children} children")]
    NotBinarized { label: String, children: usize },
    ///There is nothing to compose.
    #[error("{0} has no dependents, so there is no tree to compose")]
    EmptyTree(String),
    ///The mapping has no term for this label.
    #[error("No lambda term is defined for {0}")]
    UnknownRelation(String),
    ///A mapping template failed to parse.
    #[error("Bad lambda template: {0}")]
    Template(#[from] TermParseError),
    #[error("{0}")]
    Term(#[from] TermError),
    #[error("{0}")]
    Reduction(#[from] ReductionError),
    #[error("{0}")]
    Naming(#[from] NamingError),
    #[error("{0}")]
    Shape(#[from] ShapeError),
    #[error("Post-processing failed: {0}")]
    PostProcess(#[from] PostProcessError),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

///Settings for a [`Transformer`]. Every field has a default, so a JSON config only needs to give
///the ones it changes.
///
///```
///# use dep2lambda::dependency::PipelineConfig;
///let config = PipelineConfig::from_json(r#"{"max_reduction_steps": 20, "priorities": {"obj": 10}}"#)?;
///assert_eq!(config.max_reduction_steps, 20);
///assert_eq!(config.default_priority, 500);
///assert_eq!(config.priorities.get("obj"), Some(&10));
///# Ok::<(), anyhow::Error>(())
///```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    ///The reduction budget at each composed node.
    pub max_reduction_steps: usize,
    ///The priority of relations that have none.
    pub default_priority: i32,
    ///The priority of words, which should sort before every relation.
    pub word_priority: i32,
    ///Priorities that override or extend the built-in table.
    pub priorities: HashMap<String, i32>,
    ///The first canonical variable index.
    pub canonical_start: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            max_reduction_steps: DEFAULT_MAX_STEPS,
            default_priority: priority::DEFAULT_PRIORITY,
            word_priority: 0,
            priorities: HashMap::default(),
            canonical_start: 1,
        }
    }
}

impl PipelineConfig {
    ///Load a config from JSON.
    ///
    ///# Errors
    ///Returns the [`serde_json::Error`] if `s` is not a valid config.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
