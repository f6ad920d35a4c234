use itertools::Itertools;

use super::implication::Implication;

/// An ordered sequence of candidate rules.
///
/// Unlike a set, the order is significant: subsets are enumerated by index,
/// and the first surviving subset of the smallest size wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HypothesisSpace(pub Vec<Implication>);

impl From<Vec<Implication>> for HypothesisSpace {
    fn from(rules: Vec<Implication>) -> Self {
        Self(rules)
    }
}

impl<'a> IntoIterator for &'a HypothesisSpace {
    type Item = &'a Implication;
    type IntoIter = std::slice::Iter<'a, Implication>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl HypothesisSpace {
    /// Parses each string as a rule, failing on the first one that does not parse.
    pub fn new<I>(vals: I) -> Result<Self, String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        vals.into_iter()
            .map(|v| Implication::from_string(v.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Implication> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, rule: &Implication) -> bool {
        self.0.iter().any(|r| r == rule)
    }

    pub fn add(&mut self, rule: Implication) {
        self.0.push(rule);
    }

    /// All index combinations of size `k`, in lexicographic order.
    pub fn subsets(&self, k: usize) -> Box<dyn Iterator<Item = Vec<&Implication>> + '_> {
        if k == 0 {
            return Box::new(std::iter::once(vec![]));
        }
        Box::new(
            (0..self.len())
                .combinations(k)
                .map(move |idxs| idxs.into_iter().map(|i| &self.0[i]).collect()),
        )
    }

    pub fn to_str_vec(&self) -> Vec<String> {
        self.iter().map(|rule| rule.name().to_string()).collect()
    }
}
