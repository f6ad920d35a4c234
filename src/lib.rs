//! Recovering a minimal trusted subset of Horn rules.
//!
//! The pipeline is:
//! - [`closure`] derives every ground equality reachable from a premise set
//!   under a set of syntactic rules, within a step budget;
//! - [`consistent`] and [`entails`] are oracles built on that closure;
//! - [`synthesize_minimal`] searches rule subsets by increasing cardinality;
//! - [`cegis_recover`] alternates synthesis with a check against a fixed list
//!   of forbidden conclusions until a candidate survives.

use std::hash::BuildHasherDefault;

pub mod conditions;
pub mod recipe_utils;
pub mod report;
pub mod sexp;
pub mod synth;
pub mod term;

pub use conditions::{
    closure::{closure, DerivedSet},
    derive::{consistent, consistent_within, entails, entails_within},
    equality::Equality,
    implication::Implication,
    implication_set::HypothesisSpace,
};
pub use synth::{
    cegis::{cegis_recover, cegis_recover_with_limits, CegisOutcome, CegisResult},
    minimal::{synthesize_minimal, synthesize_minimal_with_limits},
    Example,
};
pub use term::{Constant, Term};

pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
pub type IndexSet<K> = indexmap::IndexSet<K, BuildHasherDefault<rustc_hash::FxHasher>>;

/// Budgets that bound every computation in the crate.
///
/// There is no other way to cancel a run: a closure stops after `max_steps`
/// passes and a CEGIS run stops after `max_iters` synthesis rounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of fixed-point passes in one closure computation.
    pub max_steps: usize,
    /// Maximum number of synthesis rounds in one CEGIS run.
    pub max_iters: usize,
}

impl Limits {
    pub fn deriving() -> Self {
        Self {
            max_steps: 1000,
            max_iters: 50,
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::deriving()
    }
}
