//! Ground arithmetic terms.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::sexp::Sexp;

pub type Constant = i64;

/// An immutable expression over variables, integer constants, `+` and `*`.
///
/// Terms compare structurally. Variable names are identifiers, so no
/// variable renders like a constant or a compound term, and two terms are
/// equal exactly when their renderings are.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Var(String),
    Const(Constant),
    Add(Box<Term>, Box<Term>),
    Mul(Box<Term>, Box<Term>),
}

pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

impl Term {
    /// Panics if `name` is not an identifier: such a term could not be told
    /// apart from others by its rendering.
    pub fn var(name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(is_identifier(&name), "Invalid variable name: {:?}", name);
        Term::Var(name)
    }

    pub fn constant(value: Constant) -> Self {
        Term::Const(value)
    }

    pub fn add(a: Term, b: Term) -> Self {
        Term::Add(Box::new(a), Box::new(b))
    }

    pub fn mul(a: Term, b: Term) -> Self {
        Term::Mul(Box::new(a), Box::new(b))
    }

    pub fn as_constant(&self) -> Option<Constant> {
        match self {
            Term::Const(c) => Some(*c),
            _ => None,
        }
    }

    /// The canonical rendering, e.g. `(x+3)` or `(2*x)`.
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn from_sexp(sexp: &Sexp) -> Result<Self, String> {
        match sexp {
            Sexp::Atom(a) => {
                if let Ok(c) = a.parse::<Constant>() {
                    Ok(Term::Const(c))
                } else if is_identifier(a) {
                    Ok(Term::Var(a.clone()))
                } else {
                    Err(format!("Not a constant or variable: {a}"))
                }
            }
            Sexp::List(_) => match sexp.as_application() {
                Some((op @ "+", [a, b])) | Some((op @ "*", [a, b])) => {
                    let a = Self::from_sexp(a)?;
                    let b = Self::from_sexp(b)?;
                    Ok(if op == "+" {
                        Term::add(a, b)
                    } else {
                        Term::mul(a, b)
                    })
                }
                _ => Err(format!("Unknown term: {sexp}")),
            },
        }
    }

    pub fn to_sexp(&self) -> Sexp {
        match self {
            Term::Var(v) => Sexp::Atom(v.clone()),
            Term::Const(c) => Sexp::Atom(c.to_string()),
            Term::Add(a, b) => Sexp::List(vec![Sexp::Atom("+".into()), a.to_sexp(), b.to_sexp()]),
            Term::Mul(a, b) => Sexp::List(vec![Sexp::Atom("*".into()), a.to_sexp(), b.to_sexp()]),
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Var(v) => write!(f, "{}", v),
            Term::Const(c) => write!(f, "{}", c),
            Term::Add(a, b) => write!(f, "({}+{})", a, b),
            Term::Mul(a, b) => write!(f, "({}*{})", a, b),
        }
    }
}

impl FromStr for Term {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_sexp(&s.parse()?)
    }
}
