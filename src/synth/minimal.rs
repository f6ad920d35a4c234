use crate::{
    conditions::{closure::closure, derive::entails_within},
    HypothesisSpace, Implication, Limits,
};

use super::Example;

/// Whether `candidate` entails every positive example without contradiction
/// and entails none of the negative ones.
pub fn satisfies(
    candidate: &[&Implication],
    positives: &[Example],
    negatives: &[Example],
    limits: Limits,
) -> bool {
    // one closure per positive example answers both questions
    for pos in positives {
        let derived = closure(&pos.premises, candidate.iter().copied(), limits.max_steps);
        if derived.contradiction().is_some() || !derived.contains(&pos.conclusion) {
            return false;
        }
    }
    for neg in negatives {
        if entails_within(
            &neg.premises,
            candidate.iter().copied(),
            &neg.conclusion,
            limits.max_steps,
        ) {
            log::trace!("candidate entails negative example {neg}");
            return false;
        }
    }
    true
}

/// Finds the smallest subset of `space` that satisfies all examples.
///
/// Subsets are tried by increasing size and, within a size, as index
/// combinations in lexicographic order; the first one that works is
/// returned. Among several minimal subsets the result is therefore the
/// earliest in that order, which callers may rely on. The search is
/// exhaustive and exponential in `space.len()`.
pub fn synthesize_minimal(
    positives: &[Example],
    negatives: &[Example],
    space: &HypothesisSpace,
) -> Option<Vec<Implication>> {
    synthesize_minimal_with_limits(positives, negatives, space, Limits::deriving())
}

pub fn synthesize_minimal_with_limits(
    positives: &[Example],
    negatives: &[Example],
    space: &HypothesisSpace,
    limits: Limits,
) -> Option<Vec<Implication>> {
    for k in 0..=space.len() {
        let mut tried = 0usize;
        for candidate in space.subsets(k) {
            tried += 1;
            if satisfies(&candidate, positives, negatives, limits) {
                log::debug!("found a subset of size {k} after {tried} candidates");
                return Some(candidate.into_iter().cloned().collect());
            }
        }
        log::debug!("no subset of size {k} works ({tried} candidates)");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Equality;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    fn eq(s: &str) -> Equality {
        s.parse().unwrap()
    }

    fn example(premises: &[&str], conclusion: &str) -> Example {
        Example::new(premises.iter().map(|p| eq(p)).collect(), eq(conclusion))
    }

    fn names(rules: &[Implication]) -> Vec<&str> {
        rules.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn empty_subset_when_premises_suffice() {
        let space = HypothesisSpace::new(&["(= a b) ==> (= c d)"]).unwrap();
        let found = synthesize_minimal(&[example(&["(= a b)"], "(= b a)")], &[], &space);
        assert_eq!(found, Some(vec![]));
    }

    #[test]
    fn picks_smallest_subset() {
        let space = HypothesisSpace::new(&[
            "(= (+ x 3) 7) ==> (= x 4)",
            "(= x 4) ==> (= (* 2 x) 8)",
            "(= (+ x 3) 7) ==> (= (* 2 x) 8)",
        ])
        .unwrap();
        let pos = [example(&["(= (+ x 3) 7)"], "(= (* 2 x) 8)")];
        let found = synthesize_minimal(&pos, &[], &space).unwrap();
        assert_eq!(names(&found), vec!["(= (+ x 3) 7) ==> (= (* 2 x) 8)"]);
    }

    #[test]
    fn ties_break_by_enumeration_order() {
        let space = HypothesisSpace::new(&[
            "(= a b) ==> (= c d)",
            "(= a b) ==> (= x y)",
            "(= a b) ==> (= x y)",
        ])
        .unwrap();
        let pos = [example(&["(= a b)"], "(= x y)")];
        let found = synthesize_minimal(&pos, &[], &space).unwrap();
        assert_eq!(found, vec![space.0[1].clone()]);
    }

    #[test]
    fn negatives_exclude_candidates() {
        let space = HypothesisSpace::new(&[
            "(= a b) ==> (= b c)",
            "(= a b) ==> (= a c)",
        ])
        .unwrap();
        let pos = [example(&["(= a b)"], "(= a c)")];
        // b = c chains with a = b into a = c
        let first = synthesize_minimal(&pos, &[], &space).unwrap();
        assert_eq!(first, vec![space.0[0].clone()]);

        let neg = [example(&["(= a b)"], "(= b c)")];
        let second = synthesize_minimal(&pos, &neg, &space).unwrap();
        assert_eq!(second, vec![space.0[1].clone()]);
    }

    #[test]
    fn inconsistent_subsets_are_rejected() {
        let space = HypothesisSpace::new(&[
            "(= a b) ==> (= 1 2)",
            "(= a b) ==> (= x y)",
        ])
        .unwrap();
        let pos = [example(&["(= a b)"], "(= x y)")];
        let found = synthesize_minimal(&pos, &[], &space).unwrap();
        assert_eq!(found, vec![space.0[1].clone()]);

        // a contradictory premise poisons every subset
        let pos = [example(&["(= a b)", "(= 1 2)"], "(= x y)")];
        assert_eq!(synthesize_minimal(&pos, &[], &space), None);

        // entailing a contradiction is not enough
        let pos = [example(&["(= a b)"], "(= 1 2)")];
        assert_eq!(synthesize_minimal(&pos, &[], &space), None);
    }

    #[test]
    fn none_when_target_unreachable() {
        let space = HypothesisSpace::new(&["(= a b) ==> (= c d)"]).unwrap();
        let pos = [example(&["(= a b)"], "(= x y)")];
        assert_eq!(synthesize_minimal(&pos, &[], &space), None);
    }

    fn random_eq(rng: &mut Pcg64) -> Equality {
        const ATOMS: &[&str] = &["a", "b", "c", "d", "1", "2"];
        let l = ATOMS[rng.gen_range(0, ATOMS.len())];
        let r = ATOMS[rng.gen_range(0, ATOMS.len())];
        eq(&format!("(= {l} {r})"))
    }

    #[test]
    fn result_is_sound_and_minimal() {
        let mut rng = Pcg64::seed_from_u64(0x5EED);
        let limits = Limits::deriving();
        for _ in 0..150 {
            let space: HypothesisSpace = (0..rng.gen_range(0, 6))
                .map(|_| Implication::new(random_eq(&mut rng), random_eq(&mut rng)))
                .collect::<Vec<_>>()
                .into();
            let premises = vec![random_eq(&mut rng)];
            let pos = [Example::new(premises.clone(), random_eq(&mut rng))];
            let neg = [Example::new(premises, random_eq(&mut rng))];

            match synthesize_minimal(&pos, &neg, &space) {
                Some(found) => {
                    let refs: Vec<&Implication> = found.iter().collect();
                    assert!(satisfies(&refs, &pos, &neg, limits));
                    for k in 0..found.len() {
                        for smaller in space.subsets(k) {
                            assert!(!satisfies(&smaller, &pos, &neg, limits));
                        }
                    }
                }
                None => {
                    for k in 0..=space.len() {
                        for candidate in space.subsets(k) {
                            assert!(!satisfies(&candidate, &pos, &neg, limits));
                        }
                    }
                }
            }
        }
    }
}
