//! Counterexample-guided recovery of a trusted rule subset.
//!
//! The loop is closed-world: counterexamples are only ever drawn from the
//! caller's list of forbidden conclusions, never searched for.

use crate::{conditions::derive::entails_within, Equality, HypothesisSpace, Implication, Limits};

use super::{minimal::synthesize_minimal_with_limits, Example};

/// How a CEGIS run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CegisOutcome {
    /// A candidate entails the target and none of the forbidden conclusions.
    Accepted,
    /// No subset of the hypothesis space satisfies the examples gathered so far.
    Infeasible,
    /// The iteration budget ran out first.
    Exhausted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CegisResult {
    pub outcome: CegisOutcome,
    /// The accepted subset; `None` unless the outcome is `Accepted`.
    pub rules: Option<Vec<Implication>>,
    /// Negative examples in the order they were learned.
    pub negatives: Vec<Example>,
    /// Number of synthesis rounds started.
    pub iterations: usize,
}

impl CegisResult {
    pub fn is_accepted(&self) -> bool {
        self.outcome == CegisOutcome::Accepted
    }

    pub fn into_parts(self) -> (Option<Vec<Implication>>, Vec<Example>, usize) {
        (self.rules, self.negatives, self.iterations)
    }
}

enum CegisState {
    Searching,
    Verifying(Vec<Implication>),
    Done(CegisOutcome, Option<Vec<Implication>>),
}

/// Recovers a minimal subset of `space` that proves `target` from
/// `premises` and proves none of `forbidden`, within `max_iters` rounds.
pub fn cegis_recover(
    premises: &[Equality],
    target: &Equality,
    space: &HypothesisSpace,
    forbidden: &[Equality],
    max_iters: usize,
) -> CegisResult {
    cegis_recover_with_limits(
        premises,
        target,
        space,
        forbidden,
        Limits::deriving().with_max_iters(max_iters),
    )
}

/// Each round re-runs the synthesizer from scratch against the enlarged
/// negative set, then checks the candidate against `forbidden` in order.
/// The first forbidden conclusion it entails becomes a new negative example.
pub fn cegis_recover_with_limits(
    premises: &[Equality],
    target: &Equality,
    space: &HypothesisSpace,
    forbidden: &[Equality],
    limits: Limits,
) -> CegisResult {
    let positives = vec![Example::new(premises.to_vec(), target.clone())];
    let mut negatives: Vec<Example> = vec![];
    let mut iterations = 0;
    let mut state = CegisState::Searching;

    loop {
        state = match state {
            CegisState::Searching if iterations >= limits.max_iters => {
                CegisState::Done(CegisOutcome::Exhausted, None)
            }
            CegisState::Searching => {
                iterations += 1;
                log::info!(
                    "round {iterations}: synthesizing against {} negative example(s)",
                    negatives.len()
                );
                match synthesize_minimal_with_limits(&positives, &negatives, space, limits) {
                    Some(candidate) => CegisState::Verifying(candidate),
                    None => CegisState::Done(CegisOutcome::Infeasible, None),
                }
            }
            CegisState::Verifying(candidate) => {
                let bad = forbidden.iter().find(|c| {
                    entails_within(premises, &candidate, c, limits.max_steps)
                });
                match bad {
                    Some(bad) => {
                        log::info!(
                            "round {iterations}: candidate of size {} entails {bad}",
                            candidate.len()
                        );
                        let neg = Example::new(premises.to_vec(), bad.clone());
                        debug_assert!(!negatives.contains(&neg));
                        negatives.push(neg);
                        CegisState::Searching
                    }
                    None => CegisState::Done(CegisOutcome::Accepted, Some(candidate)),
                }
            }
            CegisState::Done(outcome, rules) => {
                log::info!(
                    "cegis finished: {outcome:?} after {iterations} round(s), {} negative example(s)",
                    negatives.len()
                );
                return CegisResult {
                    outcome,
                    rules,
                    negatives,
                    iterations,
                };
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(s: &str) -> Equality {
        s.parse().unwrap()
    }

    fn chain_space() -> HypothesisSpace {
        HypothesisSpace::new(&[
            "(= a b) ==> (= b c)",
            "(= a b) ==> (= a c)",
        ])
        .unwrap()
    }

    #[test]
    fn learns_a_negative_then_accepts() {
        let space = chain_space();
        let result = cegis_recover(&[eq("(= a b)")], &eq("(= a c)"), &space, &[eq("(= b c)")], 50);
        assert_eq!(result.outcome, CegisOutcome::Accepted);
        assert_eq!(result.rules, Some(vec![space.0[1].clone()]));
        assert_eq!(result.iterations, 2);
        assert_eq!(
            result.negatives,
            vec![Example::new(vec![eq("(= a b)")], eq("(= b c)"))]
        );
    }

    #[test]
    fn accepts_immediately_without_forbidden_hits() {
        let space = chain_space();
        let (rules, negatives, iterations) =
            cegis_recover(&[eq("(= a b)")], &eq("(= a c)"), &space, &[eq("(= c d)")], 50)
                .into_parts();
        assert_eq!(rules, Some(vec![space.0[0].clone()]));
        assert!(negatives.is_empty());
        assert_eq!(iterations, 1);
    }

    #[test]
    fn infeasible_when_every_subset_is_excluded() {
        let space = HypothesisSpace::new(&["(= a b) ==> (= b c)"]).unwrap();
        let result = cegis_recover(&[eq("(= a b)")], &eq("(= a c)"), &space, &[eq("(= b c)")], 50);
        assert_eq!(result.outcome, CegisOutcome::Infeasible);
        assert_eq!(result.rules, None);
        assert_eq!(result.negatives.len(), 1);
        assert_eq!(result.iterations, 2);
    }

    #[test]
    fn exhausted_when_budget_runs_out() {
        let space = chain_space();
        let result = cegis_recover(&[eq("(= a b)")], &eq("(= a c)"), &space, &[eq("(= b c)")], 1);
        assert_eq!(result.outcome, CegisOutcome::Exhausted);
        assert_eq!(result.rules, None);
        assert_eq!(result.negatives.len(), 1);
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn zero_budget_does_nothing() {
        let space = chain_space();
        let result = cegis_recover(&[eq("(= a b)")], &eq("(= a c)"), &space, &[], 0);
        assert_eq!(result.outcome, CegisOutcome::Exhausted);
        assert!(result.negatives.is_empty());
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn first_forbidden_hit_in_list_order() {
        // with c = d as a premise the candidate entails both b = d and a = d
        let space = HypothesisSpace::new(&["(= a b) ==> (= b c)"]).unwrap();
        let premises = [eq("(= a b)"), eq("(= c d)")];
        let learned = |forbidden: &[Equality]| -> Vec<Equality> {
            let result = cegis_recover(&premises, &eq("(= a c)"), &space, forbidden, 50);
            assert_eq!(result.outcome, CegisOutcome::Infeasible);
            result.negatives.into_iter().map(|n| n.conclusion).collect()
        };
        assert_eq!(learned(&[eq("(= b d)"), eq("(= a d)")]), vec![eq("(= b d)")]);
        assert_eq!(learned(&[eq("(= a d)"), eq("(= b d)")]), vec![eq("(= a d)")]);
    }
}
