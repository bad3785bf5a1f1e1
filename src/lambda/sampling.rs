//! Random terms for property tests and benchmarks.
use rand::{Rng, seq::IndexedRandom};

use super::{Quantifier, Term};

///Controls the shape of terms from [`Term::random`].
#[derive(Debug, Clone, PartialEq)]
pub struct RandomTermConfig {
    ///Nodes at this depth are always leaves.
    pub max_depth: u8,
    ///The chance that a node above `max_depth` is not a leaf.
    pub branch_prob: f64,
    ///The chance that a leaf is a variable rather than a constant.
    pub variable_prob: f64,
    ///Applications take between 1 and this many arguments.
    pub max_arity: usize,
    ///Names for variables and binders. A small pool makes capture and shadowing likely.
    pub variables: Vec<String>,
    ///Symbols for constants.
    pub constants: Vec<String>,
}

impl Default for RandomTermConfig {
    fn default() -> Self {
        RandomTermConfig {
            max_depth: 5,
            branch_prob: 0.6,
            variable_prob: 0.7,
            max_arity: 3,
            variables: ["x", "y", "z", "f", "g"].map(String::from).to_vec(),
            constants: ["P", "Q", "arg0"].map(String::from).to_vec(),
        }
    }
}

fn pick(r: &mut impl Rng, names: &[String], fallback: &str) -> String {
    names
        .choose(r)
        .cloned()
        .unwrap_or_else(|| fallback.to_string())
}

fn chance(r: &mut impl Rng, p: f64) -> bool {
    r.random::<f64>() < p
}

impl Term {
    fn random_inner(r: &mut impl Rng, config: &RandomTermConfig, depth: u8) -> Term {
        if depth >= config.max_depth || !chance(r, config.branch_prob) {
            return if chance(r, config.variable_prob) {
                Term::Variable(pick(r, &config.variables, "x"))
            } else {
                Term::Constant(pick(r, &config.constants, "P"))
            };
        }

        let depth = depth + 1;
        match r.random_range(0..6) {
            0 | 1 => {
                let n = r.random_range(1..=2);
                Term::Abstraction {
                    parameters: (0..n).map(|_| pick(r, &config.variables, "x")).collect(),
                    body: Box::new(Term::random_inner(r, config, depth)),
                }
            }
            2 => {
                let functor = Term::random_inner(r, config, depth);
                let n = r.random_range(1..=config.max_arity.max(1));
                Term::apply(
                    functor,
                    (0..n)
                        .map(|_| Term::random_inner(r, config, depth))
                        .collect::<Vec<_>>(),
                )
            }
            3 => {
                let n = r.random_range(2..=3);
                Term::Conjunction(
                    (0..n)
                        .map(|_| Term::random_inner(r, config, depth))
                        .collect(),
                )
            }
            4 => {
                let lhs = Term::random_inner(r, config, depth);
                Term::implies(lhs, Term::random_inner(r, config, depth))
            }
            _ => {
                if r.random_bool(0.5) {
                    Term::negation(Term::random_inner(r, config, depth))
                } else {
                    Term::Quantifier {
                        quantifier: if r.random_bool(0.5) {
                            Quantifier::Existential
                        } else {
                            Quantifier::Universal
                        },
                        vars: vec![pick(r, &config.variables, "x")],
                        formula: Box::new(Term::random_inner(r, config, depth)),
                    }
                }
            }
        }
    }

    ///Get a random well-formed term.
    ///
    ///Binders always declare at least one name and conjunctions always have at least two operands,
    ///but nothing else is guaranteed: the term may well have no normal form.
    pub fn random(r: &mut impl Rng, config: &RandomTermConfig) -> Term {
        Term::random_inner(r, config, 0)
    }
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::lambda::reduction::{DEFAULT_MAX_STEPS, beta_reduce};

    #[test]
    fn random_terms_print_and_parse() -> anyhow::Result<()> {
        let mut r = ChaCha8Rng::seed_from_u64(32);
        let config = RandomTermConfig::default();
        for _ in 0..1_000 {
            let t = Term::random(&mut r, &config);
            let printed = t.to_string();
            assert_eq!(printed.parse::<Term>()?, t, "{printed}");
        }
        Ok(())
    }

    #[test]
    fn random_normal_forms_are_stable() -> anyhow::Result<()> {
        let mut r = ChaCha8Rng::seed_from_u64(0);
        let config = RandomTermConfig::default();
        for _ in 0..1_000 {
            let t = Term::random(&mut r, &config);
            if let Ok(reduced) = beta_reduce(&t, DEFAULT_MAX_STEPS) {
                assert_eq!(beta_reduce(&reduced, DEFAULT_MAX_STEPS)?, reduced, "{t}");
            }
        }
        Ok(())
    }

    #[test]
    fn degenerate_config() {
        let mut r = ChaCha8Rng::seed_from_u64(1);
        let config = RandomTermConfig {
            max_depth: 0,
            variable_prob: 1.0,
            variables: vec![],
            ..RandomTermConfig::default()
        };
        assert_eq!(Term::random(&mut r, &config), Term::var("x"));
    }
}
