use super::Formula;

pub trait FormulaVisitor {
    type Ret;

    fn visit(&mut self, node: &Formula) -> Self::Ret {
        match node {
            Formula::Var(s) => self.visit_var(s),
            Formula::Not(c) => self.visit_not(c),
            Formula::And(left, right) => self.visit_and(left, right),
            Formula::Or(left, right) => self.visit_or(left, right),
            Formula::Impl(left, right) => self.visit_impl(left, right),
            Formula::Equiv(left, right) => self.visit_equiv(left, right),
        }
    }

    fn visit_var(&mut self, spelling: &str) -> Self::Ret;

    fn visit_not(&mut self, child: &Formula) -> Self::Ret;

    fn visit_and(&mut self, left: &Formula, right: &Formula) -> Self::Ret;

    fn visit_or(&mut self, left: &Formula, right: &Formula) -> Self::Ret;

    fn visit_impl(&mut self, left: &Formula, right: &Formula) -> Self::Ret;

    fn visit_equiv(&mut self, left: &Formula, right: &Formula) -> Self::Ret;
}
