//! Binarizing dependency trees and composing their semantics.
use log::debug;
use serde::Serialize;

use super::{PipelineConfig, PipelineError, mapping::LambdaMapping, priority::RelationPriority, tree::DepTree};
use crate::lambda::{
    Term,
    flatten::flatten,
    naming::{CanonicalNames, uniqueify_var_names},
    reduction::beta_reduce,
};

///A binarized tree whose nodes have been given their terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LambdaTree {
    ///The prefixed label of the node, see [`DepTree::prefixed_label`].
    pub label: String,
    pub term: Term,
    pub children: Vec<LambdaTree>,
}

///Turns dependency trees into lambda terms.
///
///The transformer keeps a running supply of canonical names, so the terms assigned to the nodes
///of every tree it sees never share a variable name.
#[derive(Debug, Clone)]
pub struct Transformer<M> {
    priority: RelationPriority,
    mapping: M,
    config: PipelineConfig,
    names: CanonicalNames,
}

impl<M: LambdaMapping> Transformer<M> {
    ///A transformer using the built-in priorities with the overrides of `config`.
    pub fn new(mapping: M, config: PipelineConfig) -> Self {
        Transformer {
            priority: RelationPriority::from_config(&config),
            names: CanonicalNames::starting_at(config.canonical_start),
            mapping,
            config,
        }
    }

    ///Replace the priority table.
    #[must_use]
    pub fn with_priority(mut self, priority: RelationPriority) -> Self {
        self.priority = priority;
        self
    }

    fn rank(&self, node: &DepTree) -> i32 {
        if node.is_word() {
            self.config.word_priority
        } else {
            self.priority.get(node.label())
        }
    }

    ///Binarize the dependents of `tree`.
    ///
    ///The children are stably sorted by priority and folded from the left: each child becomes a
    ///node whose left child is everything before it and whose right child is its own binarized
    ///subtree. The node of `tree` itself is dropped, so the label of the root relation never
    ///needs a term. Returns `None` if `tree` has no children.
    ///
    ///```
    ///# use dep2lambda::dependency::{DepTree, PipelineConfig, Transformer, mapping::EventMapping};
    ///let tree = DepTree::relation("ROOT")
    ///    .with_child(DepTree::word("acquired", None))
    ///    .with_child(DepTree::relation("nsubj").with_child(DepTree::word("Disney", None)))
    ///    .with_child(DepTree::relation("dobj").with_child(DepTree::word("Pixar", None)));
    ///let transformer = Transformer::new(EventMapping, PipelineConfig::default());
    ///let binarized = transformer.binarize(&tree).unwrap();
    ///assert_eq!(
    ///    binarized.to_string(),
    ///    "l-nsubj\n\tl-dobj\n\t\tw-acquired\n\t\tw-Pixar\n\tw-Disney"
    ///);
    ///```
    #[must_use]
    pub fn binarize(&self, tree: &DepTree) -> Option<DepTree> {
        let mut children: Vec<&DepTree> = tree.children().iter().collect();
        children.sort_by_cached_key(|x| self.rank(x));

        let mut binarized = None;
        for child in children {
            let mut node = child.copy_node_data();
            if let Some(left) = binarized.take() {
                node.children_mut().push(left);
            }
            if let Some(right) = self.binarize(child) {
                node.children_mut().push(right);
            }
            binarized = Some(node);
        }
        binarized
    }

    ///Give every node of a binarized tree its term from the mapping, with its variables renamed to
    ///canonical names that are unique across everything this transformer has assigned.
    ///
    ///# Errors
    ///Returns [`PipelineError::NotBinarized`] if a node has neither 0 nor 2 children, or any error
    ///from the mapping.
    pub fn assign_lambda(&mut self, tree: &DepTree) -> Result<LambdaTree, PipelineError> {
        let n = tree.children().len();
        if n != 0 && n != 2 {
            return Err(PipelineError::NotBinarized {
                label: tree.prefixed_label(),
                children: n,
            });
        }
        let term = uniqueify_var_names(&self.mapping.term(tree)?, &mut self.names)?;
        let children = tree
            .children()
            .iter()
            .map(|x| self.assign_lambda(x))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LambdaTree {
            label: tree.prefixed_label(),
            term,
            children,
        })
    }

    ///Compose the semantics of a tree bottom-up: a leaf is its own term, and a node with two
    ///children is the normal form of its term applied to the composed terms of both children.
    ///
    ///# Errors
    ///Returns [`PipelineError::NotBinarized`] or the [`PipelineError::Reduction`] of a node that
    ///doesn't reduce.
    pub fn compose_semantics(&self, tree: &LambdaTree) -> Result<Term, PipelineError> {
        match tree.children.as_slice() {
            [] => Ok(tree.term.clone()),
            [left, right] => {
                let applied = Term::apply(
                    tree.term.clone(),
                    [self.compose_semantics(left)?, self.compose_semantics(right)?],
                );
                let reduced = beta_reduce(&applied, self.config.max_reduction_steps)?;
                debug!("Composed {}: {reduced}", tree.label);
                Ok(reduced)
            }
            children => Err(PipelineError::NotBinarized {
                label: tree.label.clone(),
                children: children.len(),
            }),
        }
    }

    ///The semantics of a whole dependency tree: binarize it, assign terms, compose them, rename
    ///every variable to a canonical name and flatten the result.
    ///
    ///# Errors
    ///Returns a [`PipelineError`] from whichever step fails, or [`PipelineError::EmptyTree`] if
    ///`tree` has no children.
    pub fn semantics(&mut self, tree: &DepTree) -> Result<Term, PipelineError> {
        let binarized = self
            .binarize(tree)
            .ok_or_else(|| PipelineError::EmptyTree(tree.prefixed_label()))?;
        let assigned = self.assign_lambda(&binarized)?;
        let composed = self.compose_semantics(&assigned)?;
        let named = uniqueify_var_names(
            &composed,
            &mut CanonicalNames::starting_at(self.config.canonical_start),
        )?;
        Ok(flatten(&named)?)
    }
}
