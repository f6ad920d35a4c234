// Derivability questions answered by recomputing the closure.

use crate::Limits;

use super::{closure::closure, equality::Equality, implication::Implication};

/// Whether the closure of `premises` under `rules` is free of equalities
/// between two different constants, using the default step budget.
pub fn consistent<'a, R>(premises: &[Equality], rules: R) -> bool
where
    R: IntoIterator<Item = &'a Implication>,
{
    consistent_within(premises, rules, Limits::deriving().max_steps)
}

pub fn consistent_within<'a, R>(premises: &[Equality], rules: R, max_steps: usize) -> bool
where
    R: IntoIterator<Item = &'a Implication>,
{
    match closure(premises, rules, max_steps).contradiction() {
        Some(bad) => {
            log::trace!("inconsistent: derived {bad}");
            false
        }
        None => true,
    }
}

/// Whether `target` is derivable from `premises` under `rules`, using the
/// default step budget. A `false` only means "not within the budget".
pub fn entails<'a, R>(premises: &[Equality], rules: R, target: &Equality) -> bool
where
    R: IntoIterator<Item = &'a Implication>,
{
    entails_within(premises, rules, target, Limits::deriving().max_steps)
}

pub fn entails_within<'a, R>(
    premises: &[Equality],
    rules: R,
    target: &Equality,
    max_steps: usize,
) -> bool
where
    R: IntoIterator<Item = &'a Implication>,
{
    closure(premises, rules, max_steps).contains(target)
}
