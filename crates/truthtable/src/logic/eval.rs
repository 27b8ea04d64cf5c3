use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::{visitor::FormulaVisitor, Formula};

/// A total mapping from atom names to truth values.
pub type Assignment = BTreeMap<String, bool>;

pub type EvalResult<T> = Result<T, EvalErr>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalErr {
    UnboundAtom(String),
}

impl fmt::Display for EvalErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalErr::UnboundAtom(a) => write!(f, "Atom '{a}' has no truth value assigned"),
        }
    }
}

/// Anything that can give an atom a truth value.
pub trait Interpretation {
    fn value_of(&self, atom: &str) -> Option<bool>;
}

impl Interpretation for BTreeMap<String, bool> {
    fn value_of(&self, atom: &str) -> Option<bool> {
        self.get(atom).copied()
    }
}

impl Interpretation for HashMap<String, bool> {
    fn value_of(&self, atom: &str) -> Option<bool> {
        self.get(atom).copied()
    }
}

impl<'a> Interpretation for HashMap<&'a str, bool> {
    fn value_of(&self, atom: &str) -> Option<bool> {
        self.get(atom).copied()
    }
}

/// Evaluates `formula` under `interpretation` using classical semantics.
/// Both operands of a binary connective are always evaluated, so an
/// unbound atom is reported no matter where it occurs.
pub fn evaluate<I: Interpretation + ?Sized>(
    formula: &Formula,
    interpretation: &I,
) -> EvalResult<bool> {
    Evaluator { interpretation }.visit(formula)
}

struct Evaluator<'i, I: ?Sized> {
    interpretation: &'i I,
}

impl<'i, I: Interpretation + ?Sized> FormulaVisitor for Evaluator<'i, I> {
    type Ret = EvalResult<bool>;

    fn visit_var(&mut self, spelling: &str) -> Self::Ret {
        self.interpretation
            .value_of(spelling)
            .ok_or_else(|| EvalErr::UnboundAtom(spelling.to_string()))
    }

    fn visit_not(&mut self, child: &Formula) -> Self::Ret {
        Ok(!self.visit(child)?)
    }

    fn visit_and(&mut self, left: &Formula, right: &Formula) -> Self::Ret {
        let l = self.visit(left)?;
        let r = self.visit(right)?;
        Ok(l && r)
    }

    fn visit_or(&mut self, left: &Formula, right: &Formula) -> Self::Ret {
        let l = self.visit(left)?;
        let r = self.visit(right)?;
        Ok(l || r)
    }

    fn visit_impl(&mut self, left: &Formula, right: &Formula) -> Self::Ret {
        let l = self.visit(left)?;
        let r = self.visit(right)?;
        Ok(!l || r)
    }

    fn visit_equiv(&mut self, left: &Formula, right: &Formula) -> Self::Ret {
        let l = self.visit(left)?;
        let r = self.visit(right)?;
        Ok(l == r)
    }
}
