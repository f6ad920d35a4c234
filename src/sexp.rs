use std::{fmt::Display, str::FromStr};

/// A minimal s-expression: the textual surface for terms, equalities and rules.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sexp {
    Atom(String),
    List(Vec<Self>),
}

impl FromStr for Sexp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use symbolic_expressions::parser::parse_str;
        let sexp = parse_str(s.trim()).map_err(|e| format!("Failed to parse {s}: {e:?}"))?;
        Ok(Self::from_symbolic_expr(sexp))
    }
}

impl Display for Sexp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sexp::Atom(x) => write!(f, "{}", x),
            Sexp::List(l) => {
                write!(f, "(")?;
                for (i, x) in l.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", x)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl Sexp {
    fn from_symbolic_expr(sexp: symbolic_expressions::Sexp) -> Self {
        match sexp {
            symbolic_expressions::Sexp::String(s) => Self::Atom(s),
            symbolic_expressions::Sexp::List(ss) => {
                Self::List(ss.into_iter().map(Self::from_symbolic_expr).collect())
            }
            symbolic_expressions::Sexp::Empty => Self::List(vec![]),
        }
    }

    /// The operator and arguments of a list whose head is an atom.
    pub fn as_application(&self) -> Option<(&str, &[Sexp])> {
        match self {
            Sexp::List(l) => match l.split_first() {
                Some((Sexp::Atom(op), args)) => Some((op.as_str(), args)),
                _ => None,
            },
            Sexp::Atom(_) => None,
        }
    }
}
