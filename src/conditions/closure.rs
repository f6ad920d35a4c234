use crate::{HashMap, IndexSet};

use super::{equality::Equality, implication::Implication};

/// The canonical equalities derived by one closure computation.
///
/// Only grows while the fixed point is computed. Iterates in insertion
/// order: premises first, then additions pass by pass.
#[derive(Clone, Debug, Default)]
pub struct DerivedSet(IndexSet<Equality>);

impl PartialEq for DerivedSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl Eq for DerivedSet {}

impl<'a> IntoIterator for &'a DerivedSet {
    type Item = &'a Equality;
    type IntoIter = indexmap::set::Iter<'a, Equality>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl DerivedSet {
    /// Membership of the canonical form of `eq`.
    pub fn contains(&self, eq: &Equality) -> bool {
        if eq.is_canonical() {
            self.0.contains(eq)
        } else {
            self.0.contains(&eq.clone().canonicalize())
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Equality> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.0.iter().all(|e| other.0.contains(e))
    }

    /// The first derived equality between two different constants, if any.
    pub fn contradiction(&self) -> Option<&Equality> {
        self.0.iter().find(|e| e.is_contradiction())
    }

    fn insert(&mut self, eq: Equality) -> bool {
        debug_assert!(eq.is_canonical());
        self.0.insert(eq)
    }
}

/// Rules keyed by canonical antecedent.
struct Triggers(HashMap<Equality, Vec<Equality>>);

impl Triggers {
    fn new<'a>(rules: impl IntoIterator<Item = &'a Implication>) -> Self {
        let mut map: HashMap<Equality, Vec<Equality>> = HashMap::default();
        for rule in rules {
            let (ant, cons) = rule.canonical();
            map.entry(ant).or_default().push(cons);
        }
        Self(map)
    }

    /// Consequents of every rule whose antecedent is in `derived` and whose
    /// consequent is not.
    fn fire(&self, derived: &DerivedSet) -> Vec<Equality> {
        let mut out = vec![];
        for eq in derived {
            if let Some(conses) = self.0.get(eq) {
                for cons in conses {
                    if !derived.0.contains(cons) {
                        out.push(cons.clone());
                    }
                }
            }
        }
        out
    }
}

/// For every ordered pair `(a = b, b = c)` of derived equalities, `a = c` in
/// canonical form, when not yet derived. Chains on whole sides only.
fn transitive_step(derived: &DerivedSet) -> Vec<Equality> {
    let mut by_left: HashMap<&crate::Term, Vec<&Equality>> = HashMap::default();
    for eq in derived {
        by_left.entry(&eq.left).or_default().push(eq);
    }

    let mut out = vec![];
    for e1 in derived {
        if let Some(nexts) = by_left.get(&e1.right) {
            for e2 in nexts {
                let new = Equality::canonical(e1.left.clone(), e2.right.clone());
                if !derived.0.contains(&new) {
                    out.push(new);
                }
            }
        }
    }
    out
}

/// Derives everything reachable from `premises` under `rules` in at most
/// `max_steps` passes.
///
/// A pass first fires every enabled rule, then adds one round of
/// transitive chaining. Each phase collects its additions against the set as
/// it stood when the phase began, so the result is independent of rule and
/// pair order. Stops early at a fixed point; when the budget runs out first,
/// the result under-approximates the full closure.
pub fn closure<'a, R>(premises: &[Equality], rules: R, max_steps: usize) -> DerivedSet
where
    R: IntoIterator<Item = &'a Implication>,
{
    let mut derived = DerivedSet::default();
    for p in premises {
        derived.insert(p.clone().canonicalize());
    }
    let triggers = Triggers::new(rules);

    let mut steps = 0;
    let mut changed = true;
    while changed && steps < max_steps {
        steps += 1;
        changed = false;

        for eq in triggers.fire(&derived) {
            changed |= derived.insert(eq);
        }

        for eq in transitive_step(&derived) {
            changed |= derived.insert(eq);
        }
    }

    if changed {
        log::debug!(
            "closure hit the step budget ({max_steps}) with {} equalities",
            derived.len()
        );
    } else {
        log::trace!(
            "closure reached a fixed point after {steps} steps with {} equalities",
            derived.len()
        );
    }
    derived
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HypothesisSpace;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    fn eqs(ss: &[&str]) -> Vec<Equality> {
        ss.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn premises_only() {
        let derived = closure(&eqs(&["(= 7 (+ x 3))"]), &HypothesisSpace::default(), 10);
        assert_eq!(derived.len(), 1);
        assert!(derived.contains(&"(= (+ x 3) 7)".parse().unwrap()));
        assert!(derived.contains(&"(= 7 (+ x 3))".parse().unwrap()));
    }

    #[test]
    fn rules_chain_across_passes() {
        let rules = HypothesisSpace::new(&[
            "(= x 4) ==> (= (* 2 x) 8)",
            "(= (+ x 3) 7) ==> (= x 4)",
        ])
        .unwrap();
        let premises = eqs(&["(= (+ x 3) 7)"]);

        // the second rule only becomes enabled in the second pass
        let one = closure(&premises, &rules, 1);
        assert!(one.contains(&"(= x 4)".parse().unwrap()));
        assert!(!one.contains(&"(= (* 2 x) 8)".parse().unwrap()));

        let two = closure(&premises, &rules, 2);
        assert!(two.contains(&"(= (* 2 x) 8)".parse().unwrap()));
        assert_eq!(two.len(), 3);
    }

    #[test]
    fn rules_fire_on_exact_antecedent_only() {
        let rules = HypothesisSpace::new(&["(= (+ x 3) 7) ==> (= x 4)"]).unwrap();
        let derived = closure(&eqs(&["(= (+ 3 x) 7)"]), &rules, 10);
        assert_eq!(derived.len(), 1);
        assert!(!derived.contains(&"(= x 4)".parse().unwrap()));
    }

    #[test]
    fn transitivity_on_top_level_sides() {
        let derived = closure(&eqs(&["(= a b)", "(= b c)"]), &HypothesisSpace::default(), 10);
        assert!(derived.contains(&"(= a c)".parse().unwrap()));
        assert_eq!(derived.len(), 3);
    }

    #[test]
    fn transitivity_does_not_look_inside_terms() {
        // a = b does not make (a+1) = (b+1)
        let derived = closure(&eqs(&["(= a b)", "(= (+ a 1) z)"]), &HypothesisSpace::default(), 10);
        assert!(!derived.contains(&"(= (+ b 1) z)".parse().unwrap()));
    }

    #[test]
    fn transitivity_respects_canonical_orientation() {
        // canonical forms are (3 = x) and (4 = x): x is never a left side
        let derived = closure(&eqs(&["(= x 3)", "(= x 4)"]), &HypothesisSpace::default(), 10);
        assert_eq!(derived.len(), 2);
        assert!(derived.contradiction().is_none());
    }

    #[test]
    fn zero_steps_returns_premises() {
        let rules = HypothesisSpace::new(&["(= a b) ==> (= c d)"]).unwrap();
        let derived = closure(&eqs(&["(= a b)"]), &rules, 0);
        assert_eq!(derived.len(), 1);
    }

    #[test]
    fn contradictions_are_found() {
        let rules = HypothesisSpace::new(&["(= a b) ==> (= 5 6)"]).unwrap();
        let derived = closure(&eqs(&["(= a b)"]), &rules, 10);
        assert_eq!(derived.contradiction().unwrap().to_string(), "5 = 6");
    }

    fn random_eq(rng: &mut Pcg64) -> Equality {
        const ATOMS: &[&str] = &["a", "b", "c", "d", "1", "2", "(+ a 1)", "(* 2 b)"];
        let l = ATOMS[rng.gen_range(0, ATOMS.len())];
        let r = ATOMS[rng.gen_range(0, ATOMS.len())];
        format!("(= {l} {r})").parse().unwrap()
    }

    fn random_problem(rng: &mut Pcg64) -> (Vec<Equality>, HypothesisSpace) {
        let premises = (0..rng.gen_range(0, 4)).map(|_| random_eq(rng)).collect();
        let rules = (0..rng.gen_range(0, 8))
            .map(|_| Implication::new(random_eq(rng), random_eq(rng)))
            .collect::<Vec<_>>();
        (premises, rules.into())
    }

    #[test]
    fn closure_is_monotone_in_steps() {
        let mut rng = Pcg64::seed_from_u64(0xC105);
        for _ in 0..200 {
            let (premises, rules) = random_problem(&mut rng);
            let mut prev = closure(&premises, &rules, 0);
            for steps in 1..6 {
                let next = closure(&premises, &rules, steps);
                assert!(prev.is_subset(&next));
                prev = next;
            }
        }
    }

    #[test]
    fn closure_is_independent_of_rule_order() {
        let mut rng = Pcg64::seed_from_u64(0x0DE2);
        for _ in 0..200 {
            let (premises, rules) = random_problem(&mut rng);
            let mut reversed = rules.0.clone();
            reversed.reverse();
            let steps = rng.gen_range(1, 5);
            assert_eq!(
                closure(&premises, &rules, steps),
                closure(&premises, &reversed, steps)
            );
        }
    }

    #[test]
    fn derived_set_is_canonical() {
        let mut rng = Pcg64::seed_from_u64(7);
        for _ in 0..100 {
            let (premises, rules) = random_problem(&mut rng);
            for eq in &closure(&premises, &rules, 1000) {
                assert!(eq.is_canonical());
            }
        }
    }
}
