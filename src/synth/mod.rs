use std::fmt::{Display, Formatter};

use crate::Equality;

pub mod cegis;
pub mod minimal;

/// A premise set together with a conclusion.
///
/// Used both for positive examples, whose conclusion must be entailed, and
/// for negative ones, whose conclusion must not be.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Example {
    pub premises: Vec<Equality>,
    pub conclusion: Equality,
}

impl Example {
    pub fn new(premises: Vec<Equality>, conclusion: Equality) -> Self {
        Self {
            premises,
            conclusion,
        }
    }
}

impl Display for Example {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let premises: Vec<String> = self.premises.iter().map(|p| p.to_string()).collect();
        write!(f, "{{{}}} |- {}", premises.join(", "), self.conclusion)
    }
}
