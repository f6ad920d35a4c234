use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::{sexp::Sexp, term::Term};

/// A claim that two terms are equal.
///
/// An equality keeps the orientation it was written with. [`Equality::canonicalize`]
/// puts the side whose rendering is lexicographically smaller on the left;
/// that is a tie-break for storage, not an algebraic normal form, so
/// `(x+1) = 2` and `(1+x) = 2` stay distinct.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Equality {
    pub left: Term,
    pub right: Term,
}

impl Equality {
    pub fn new(left: Term, right: Term) -> Self {
        Self { left, right }
    }

    /// Builds the canonical orientation of `left = right` directly.
    pub fn canonical(left: Term, right: Term) -> Self {
        Self::new(left, right).canonicalize()
    }

    pub fn canonicalize(self) -> Self {
        if self.is_canonical() {
            self
        } else {
            Self {
                left: self.right,
                right: self.left,
            }
        }
    }

    pub fn is_canonical(&self) -> bool {
        self.left.render() <= self.right.render()
    }

    /// Both sides are constants with different values.
    pub fn is_contradiction(&self) -> bool {
        match (self.left.as_constant(), self.right.as_constant()) {
            (Some(a), Some(b)) => a != b,
            _ => false,
        }
    }

    pub fn from_sexp(sexp: &Sexp) -> Result<Self, String> {
        match sexp.as_application() {
            Some(("=", [l, r])) => Ok(Self::new(Term::from_sexp(l)?, Term::from_sexp(r)?)),
            _ => Err(format!("Not an equality: {sexp}")),
        }
    }

    pub fn to_sexp(&self) -> Sexp {
        Sexp::List(vec![
            Sexp::Atom("=".into()),
            self.left.to_sexp(),
            self.right.to_sexp(),
        ])
    }
}

impl Display for Equality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.left, self.right)
    }
}

impl FromStr for Equality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_sexp(&s.parse()?)
    }
}
