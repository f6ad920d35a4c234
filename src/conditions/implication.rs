use std::{
    fmt::{Display, Formatter},
    sync::Arc,
};

use super::equality::Equality;

/// A ground Horn rule `antecedent -> consequent`.
///
/// Rules fire on presence only: once the canonical antecedent has been
/// derived, the canonical consequent is derived too. There are no variables
/// to bind, so a rule only ever matches the exact equality it was written
/// against.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Implication {
    pub name: Arc<str>,
    pub antecedent: Equality,
    pub consequent: Equality,
}

impl Display for Implication {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}  ->  {}", self.antecedent, self.consequent)
    }
}

impl Implication {
    pub fn new(antecedent: Equality, consequent: Equality) -> Self {
        let name = format!("{} ==> {}", antecedent.to_sexp(), consequent.to_sexp());
        Self {
            name: name.into(),
            antecedent,
            consequent,
        }
    }

    /// Parses `(= l r) ==> (= l r)`; `=>` is accepted as the delimiter too.
    pub fn from_string(s: &str) -> Result<Self, String> {
        let (l, r) = s
            .split_once("==>")
            .or_else(|| s.split_once("=>"))
            .ok_or_else(|| format!("Failed to parse {s}"))?;
        let antecedent: Equality = l.parse()?;
        let consequent: Equality = r.parse()?;
        Ok(Self::new(antecedent, consequent))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pair of canonical sides that actually take part in derivation.
    pub fn canonical(&self) -> (Equality, Equality) {
        (
            self.antecedent.clone().canonicalize(),
            self.consequent.clone().canonicalize(),
        )
    }
}
