//! Dependency trees of words and relations.
use serde::{Deserialize, Serialize};
use std::fmt::Display;

///The prefix of [`DepTree::prefixed_label`] for words.
pub const WORD_PREFIX: &str = "w-";
///The prefix of [`DepTree::prefixed_label`] for relations.
pub const RELATION_PREFIX: &str = "l-";

///A token of a dependency parse, as exported by the parser.
///
///Only the fields used here are read, so the JSON may contain any others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    ///The word itself.
    pub text: String,
    ///The relation to its head, `ROOT` for the root.
    pub dep: String,
    ///Its part of speech tag.
    #[serde(default)]
    pub pos: Option<String>,
    ///Every token which depends on this one.
    #[serde(default)]
    pub children: Vec<Token>,
}

impl Token {
    ///Read a token tree from JSON.
    ///
    ///# Errors
    ///Returns the [`serde_json::Error`] if `s` isn't a token tree.
    pub fn from_json(s: &str) -> Result<Token, serde_json::Error> {
        serde_json::from_str(s)
    }
}

///Whether a [`DepTree`] node is a word or a dependency relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Word,
    Relation,
}

///The kind of thing a word denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ontology {
    ///Proper nouns and pronouns.
    Individual,
    ///Verbs and copular predicates.
    Event,
}

///A node of a dependency tree.
///
///A relation node's first child is the head word it was built from, and the rest are the relation
///nodes of its dependents. Binarization rearranges this into a tree where every node has 0 or 2
///children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepTree {
    label: String,
    kind: NodeKind,
    #[serde(default)]
    pos: Option<String>,
    #[serde(default)]
    ontology: Option<Ontology>,
    #[serde(default)]
    children: Vec<DepTree>,
}

impl DepTree {
    ///A word with no children.
    #[must_use]
    pub fn word(label: impl Into<String>, pos: Option<&str>) -> DepTree {
        DepTree {
            label: label.into(),
            kind: NodeKind::Word,
            pos: pos.map(str::to_string),
            ontology: None,
            children: vec![],
        }
    }

    ///A relation with no children.
    #[must_use]
    pub fn relation(label: impl Into<String>) -> DepTree {
        DepTree {
            label: label.into(),
            kind: NodeKind::Relation,
            pos: None,
            ontology: None,
            children: vec![],
        }
    }

    ///Build the tree of a parse from its root token.
    ///
    ///```
    ///# use dep2lambda::dependency::{DepTree, Token};
    ///let token = Token::from_json(r#"{"text": "ran", "dep": "ROOT",
    ///    "children": [{"text": "Mary", "dep": "nsubj"}]}"#)?;
    ///let tree = DepTree::from_token(&token);
    ///assert_eq!(tree.to_string(), "l-ROOT\n\tw-ran\n\tl-nsubj\n\t\tw-Mary");
    ///# Ok::<(), anyhow::Error>(())
    ///```
    #[must_use]
    pub fn from_token(token: &Token) -> DepTree {
        let mut tree = DepTree::relation(&token.dep);
        tree.children
            .push(DepTree::word(&token.text, token.pos.as_deref()));
        tree.children
            .extend(token.children.iter().map(DepTree::from_token));
        tree
    }

    ///Add `child` as the last child.
    #[must_use]
    pub fn with_child(mut self, child: DepTree) -> DepTree {
        self.children.push(child);
        self
    }

    ///A copy of this node without its children.
    #[must_use]
    pub fn copy_node_data(&self) -> DepTree {
        DepTree {
            label: self.label.clone(),
            kind: self.kind,
            pos: self.pos.clone(),
            ontology: self.ontology,
            children: vec![],
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    ///The label prefixed by `w-` for words or `l-` for relations.
    #[must_use]
    pub fn prefixed_label(&self) -> String {
        match self.kind {
            NodeKind::Word => format!("{WORD_PREFIX}{}", self.label),
            NodeKind::Relation => format!("{RELATION_PREFIX}{}", self.label),
        }
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[must_use]
    pub fn is_word(&self) -> bool {
        self.kind == NodeKind::Word
    }

    #[must_use]
    pub fn is_relation(&self) -> bool {
        self.kind == NodeKind::Relation
    }

    #[must_use]
    pub fn pos(&self) -> Option<&str> {
        self.pos.as_deref()
    }

    #[must_use]
    pub fn ontology(&self) -> Option<Ontology> {
        self.ontology
    }

    pub fn set_ontology(&mut self, ontology: Option<Ontology>) {
        self.ontology = ontology;
    }

    pub(crate) fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    #[must_use]
    pub fn children(&self) -> &[DepTree] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<DepTree> {
        &mut self.children
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn fmt_indented(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        write!(f, "{}{}", "\t".repeat(depth), self.prefixed_label())?;
        for child in &self.children {
            writeln!(f)?;
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl Display for DepTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_indented(f, 0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn labels() {
        let word = DepTree::word("arrives", Some("VERB"));
        assert_eq!(word.label(), "arrives");
        assert_eq!(word.prefixed_label(), "w-arrives");
        assert!(word.is_word() && word.is_leaf());
        assert_eq!(word.pos(), Some("VERB"));

        let relation = DepTree::relation("punct");
        assert_eq!(relation.prefixed_label(), "l-punct");
        assert_eq!(relation.prefixed_label(), format!("{RELATION_PREFIX}punct"));
        assert!(relation.is_relation());
    }

    #[test]
    fn copying_node_data() {
        let tree = DepTree::relation("advmod").with_child(DepTree::word("word", None));
        assert_eq!(tree.children().len(), 1);
        let copy = tree.copy_node_data();
        assert!(copy.is_leaf());
        assert_eq!(copy.label(), tree.label());
        assert_eq!(copy.kind(), tree.kind());
    }

    #[test]
    fn from_tokens() -> anyhow::Result<()> {
        let token = Token::from_json(
            r#"{
                "text": "stabbed", "dep": "ROOT", "pos": "VERB", "lemma": "stab",
                "children": [
                    {"text": "Brutus", "dep": "nsubj", "pos": "PROPN"},
                    {"text": "Caesar", "dep": "dobj", "pos": "PROPN", "children": []}
                ]
            }"#,
        )?;
        let tree = DepTree::from_token(&token);
        let expected = DepTree::relation("ROOT")
            .with_child(DepTree::word("stabbed", Some("VERB")))
            .with_child(
                DepTree::relation("nsubj").with_child(DepTree::word("Brutus", Some("PROPN"))),
            )
            .with_child(
                DepTree::relation("dobj").with_child(DepTree::word("Caesar", Some("PROPN"))),
            );
        assert_eq!(tree, expected);
        assert_eq!(
            tree.to_string(),
            "l-ROOT\n\tw-stabbed\n\tl-nsubj\n\t\tw-Brutus\n\tl-dobj\n\t\tw-Caesar"
        );

        assert!(Token::from_json(r#"{"text": "no relation"}"#).is_err());
        Ok(())
    }

    #[test]
    fn trees_deserialize() -> anyhow::Result<()> {
        let tree: DepTree = serde_json::from_str(
            r#"{"label": "nsubj", "kind": "Relation",
                "children": [{"label": "Mary", "kind": "Word", "ontology": "Individual"}]}"#,
        )?;
        assert_eq!(tree.children()[0].ontology(), Some(Ontology::Individual));
        assert_eq!(tree.children()[0].pos(), None);
        Ok(())
    }
}
