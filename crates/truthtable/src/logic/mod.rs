pub mod collectors;
pub mod eval;
pub mod visitor;

use std::fmt;

pub use collectors::collect_atoms;
pub use eval::{evaluate, Assignment, EvalErr, EvalResult, Interpretation};

/// A propositional formula. Every inner node owns its children.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Formula {
    Var(String),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Impl(Box<Formula>, Box<Formula>),
    Equiv(Box<Formula>, Box<Formula>),
}

impl Formula {
    /// Distinct atoms of this formula in lexicographic order.
    pub fn atoms(&self) -> Vec<String> {
        collect_atoms([self])
    }

    pub fn eval<I: Interpretation + ?Sized>(&self, interpretation: &I) -> EvalResult<bool> {
        evaluate(self, interpretation)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Var(s) => write!(f, "{}", s),
            Formula::Not(c) => write!(f, "¬{}", c),
            Formula::And(l, r) => write!(f, "({} ∧ {})", l, r),
            Formula::Or(l, r) => write!(f, "({} ∨ {})", l, r),
            Formula::Impl(l, r) => write!(f, "({} -> {})", l, r),
            Formula::Equiv(l, r) => write!(f, "({} <-> {})", l, r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Formula::*;
    use super::*;

    fn var(s: &str) -> Box<Formula> {
        Box::new(Var(s.to_string()))
    }

    #[test]
    fn display() {
        let n1 = Not(Box::new(Equiv(Box::new(Not(Box::new(Not(var("b"))))), var("a"))));
        let n2 = And(
            Box::new(Or(var("a"), Box::new(Not(var("a"))))),
            Box::new(Impl(var("c"), var("d"))),
        );

        assert_eq!("¬(¬¬b <-> a)", n1.to_string());
        assert_eq!("((a ∨ ¬a) ∧ (c -> d))", n2.to_string());
    }

    #[test]
    fn display_reparses_to_same_tree() {
        let f = crate::parse::parse("!(P1 -> Q) <-> R | S & !T").unwrap();
        assert_eq!(f, crate::parse::parse(&f.to_string()).unwrap());
    }

    #[test]
    fn atoms_sorted_and_distinct() {
        let f = Impl(
            Box::new(And(var("b"), var("a"))),
            Box::new(Or(var("b"), var("B"))),
        );
        assert_eq!(vec!["B", "a", "b"], f.atoms());
    }
}
