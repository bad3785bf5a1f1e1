//! Rewrites of a [`DepTree`] before it is binarized.
use super::tree::{DepTree, Ontology};

const UNIVERSALS: [&str; 2] = ["every", "all"];
const EXISTENTIALS: [&str; 3] = ["a", "some", "an"];

///Which side a merged dependent's word goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDirection {
    ///The dependent comes first, as in `compound` or `quantmod` (`New_York`).
    RightToLeft,
    ///The head comes first, as in `prt` or `xcomp` (`pick_up`).
    LeftToRight,
}

///Merge every dependent attached by `relation` into its head word, joining them with `_`.
///
///Dependents are merged recursively first, and whatever else depended on the merged word is
///re-attached to the head.
///
///```
///# use dep2lambda::dependency::{DepTree, preprocess::{merge_compounds, MergeDirection}};
///let tree = DepTree::relation("nsubj")
///    .with_child(DepTree::word("York", Some("PROPN")))
///    .with_child(DepTree::relation("compound").with_child(DepTree::word("New", Some("PROPN"))));
///let merged = merge_compounds(&tree, "compound", MergeDirection::RightToLeft);
///assert_eq!(merged.to_string(), "l-nsubj\n\tw-New_York");
///```
#[must_use]
pub fn merge_compounds(tree: &DepTree, relation: &str, direction: MergeDirection) -> DepTree {
    let mut merged = tree.copy_node_data();
    for child in tree.children() {
        if child.is_relation() && child.label() == relation {
            let dependent = merge_compounds(child, relation, direction);
            let Some((word, rest)) = dependent.children().split_first() else {
                continue;
            };
            match merged.children_mut().first_mut() {
                Some(head) => {
                    let label = match direction {
                        MergeDirection::RightToLeft => format!("{}_{}", word.label(), head.label()),
                        MergeDirection::LeftToRight => format!("{}_{}", head.label(), word.label()),
                    };
                    head.set_label(label);
                }
                None => merged.children_mut().push(word.clone()),
            }
            merged.children_mut().extend(rest.iter().cloned());
        } else {
            merged
                .children_mut()
                .push(merge_compounds(child, relation, direction));
        }
    }
    merged
}

///Relabel `det` relations as `det:univ` or `det:exis` based on their determiner.
#[must_use]
pub fn enrich_determiners(tree: &DepTree) -> DepTree {
    let mut enriched = tree.copy_node_data();
    if tree.is_relation() && tree.label() == "det" {
        if let Some(determiner) = tree.children().first() {
            let word = determiner.label().to_lowercase();
            if UNIVERSALS.contains(&word.as_str()) {
                enriched.set_label("det:univ");
            } else if EXISTENTIALS.contains(&word.as_str()) {
                enriched.set_label("det:exis");
            }
        }
    }
    enriched
        .children_mut()
        .extend(tree.children().iter().map(enrich_determiners));
    enriched
}

fn word_ontology(word: &DepTree, copular: bool) -> Option<Ontology> {
    match word.pos() {
        Some("PROPN" | "PRON") => Some(Ontology::Individual),
        Some("VERB") => Some(Ontology::Event),
        _ if copular => Some(Ontology::Event),
        _ => None,
    }
}

///Give every word an [`Ontology`]: proper nouns and pronouns are individuals, while verbs and
///words with a `cop` sibling are events. Relations have none.
#[must_use]
pub fn assign_ontology(tree: &DepTree) -> DepTree {
    fn assign(tree: &DepTree, copular: bool) -> DepTree {
        let mut assigned = tree.copy_node_data();
        if tree.is_word() {
            assigned.set_ontology(word_ontology(tree, copular));
        } else {
            assigned.set_ontology(None);
        }
        let copular = tree
            .children()
            .iter()
            .any(|x| x.is_relation() && x.label() == "cop");
        assigned
            .children_mut()
            .extend(tree.children().iter().map(|x| assign(x, copular)));
        assigned
    }
    assign(tree, false)
}
