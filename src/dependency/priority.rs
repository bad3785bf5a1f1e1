//! The order in which a head combines with its dependents.
use ahash::HashMap;
use log::warn;

use super::PipelineConfig;

///The priority of relations missing from the table.
pub const DEFAULT_PRIORITY: i32 = 500;

const BUILT_IN: [(&str, i32); 37] = [
    ("ROOT", -1),
    ("amod", 2),
    ("nn", 2),
    ("num", 2),
    ("quantmod", 2),
    ("nmod", 2),
    ("dobj", 10),
    ("pobj", 10),
    ("aux", 10),
    ("expl", 10),
    ("prt", 10),
    ("xcomp", 20),
    ("pcomp", 20),
    ("attr", 30),
    ("prep", 30),
    ("det", 30),
    ("auxpass", 30),
    ("acomp", 30),
    ("rel", 30),
    ("conj", 35),
    ("cc", 35),
    ("neg", 35),
    ("dep", 35),
    ("iobj", 40),
    ("appos", 40),
    ("nsubj", 45),
    ("nsubjpass", 45),
    ("mark", 50),
    ("poss", 50),
    ("npavmod", 50),
    ("advmod", 50),
    ("advcl", 50),
    ("tmod", 50),
    ("punct", 100),
    ("obj", 10),
    ("cop", 10),
    ("compound", 2),
];

///Maps relation labels to priorities. Lower priorities combine with the head first, so they end
///up deeper in the binarized tree.
///
///```
///# use dep2lambda::dependency::RelationPriority;
///let priority = RelationPriority::default();
///assert!(priority.get("dobj") < priority.get("nsubj"));
///assert_eq!(priority.get("det:univ"), priority.get("det"));
///assert_eq!(priority.get("reparandum"), 500);
///```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationPriority {
    table: HashMap<String, i32>,
    default: i32,
}

impl Default for RelationPriority {
    fn default() -> Self {
        RelationPriority::new(
            BUILT_IN.iter().map(|(k, v)| ((*k).to_string(), *v)),
            DEFAULT_PRIORITY,
        )
    }
}

impl RelationPriority {
    ///A table with exactly the given priorities.
    pub fn new(table: impl IntoIterator<Item = (String, i32)>, default: i32) -> Self {
        RelationPriority {
            table: table.into_iter().collect(),
            default,
        }
    }

    ///The built-in table with the config's overrides and default.
    #[must_use]
    pub fn from_config(config: &PipelineConfig) -> Self {
        let mut priority = RelationPriority::default();
        priority.default = config.default_priority;
        priority.table.extend(
            config
                .priorities
                .iter()
                .map(|(k, v)| (k.clone(), *v)),
        );
        priority
    }

    ///The priority of `label`. A subtyped label like `det:univ` falls back to its base type, and
    ///a label without a priority gets the default.
    #[must_use]
    pub fn get(&self, label: &str) -> i32 {
        if let Some(priority) = self.table.get(label) {
            return *priority;
        }
        if let Some(priority) = label
            .split_once(':')
            .and_then(|(base, _)| self.table.get(base))
        {
            return *priority;
        }
        warn!("Relation {label} has no priority, using {}", self.default);
        self.default
    }
}
