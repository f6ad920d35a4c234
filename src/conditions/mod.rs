//! Ground equalities, Horn rules over them, and the closure they generate.

pub mod closure;
pub mod derive;
pub mod equality;
pub mod implication;
pub mod implication_set;
