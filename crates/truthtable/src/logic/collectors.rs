use std::collections::BTreeSet;

use super::{visitor::FormulaVisitor, Formula};

/// Collects the distinct atoms of all given formulas, sorted
/// lexicographically. The position of an atom in the result is the bit
/// index it gets during enumeration.
pub fn collect_atoms<'a, I>(nodes: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Formula>,
{
    let mut c = AtomCollector::new();
    for n in nodes {
        c.visit(n);
    }
    c.0.into_iter().collect()
}

pub struct AtomCollector(BTreeSet<String>);

impl AtomCollector {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }
}

impl Default for AtomCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl FormulaVisitor for AtomCollector {
    type Ret = ();

    fn visit_var(&mut self, spelling: &str) -> Self::Ret {
        if !self.0.contains(spelling) {
            self.0.insert(spelling.to_string());
        }
    }

    fn visit_not(&mut self, child: &Formula) -> Self::Ret {
        self.visit(child)
    }

    fn visit_and(&mut self, left: &Formula, right: &Formula) -> Self::Ret {
        self.visit(left);
        self.visit(right)
    }

    fn visit_or(&mut self, left: &Formula, right: &Formula) -> Self::Ret {
        self.visit(left);
        self.visit(right)
    }

    fn visit_impl(&mut self, left: &Formula, right: &Formula) -> Self::Ret {
        self.visit(left);
        self.visit(right)
    }

    fn visit_equiv(&mut self, left: &Formula, right: &Formula) -> Self::Ret {
        self.visit(left);
        self.visit(right)
    }
}
