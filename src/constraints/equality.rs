use super::Eval;
use crate::basic_types::PropagationStatus;
use crate::basic_types::VarId;
use crate::engine::Assignment;

/// Enforces `lhs == rhs`.
#[derive(Clone, Copy, Debug)]
pub struct EqualityConstraint {
    pub(crate) lhs: VarId,
    pub(crate) rhs: VarId,
}

impl EqualityConstraint {
    pub fn new(lhs: VarId, rhs: VarId) -> EqualityConstraint {
        EqualityConstraint { lhs, rhs }
    }

    pub(crate) fn evaluate(&self, inst_vars: &[Option<i32>]) -> Eval {
        match (inst_vars[self.lhs.index()], inst_vars[self.rhs.index()]) {
            (Some(lhs), Some(rhs)) => {
                if lhs == rhs {
                    Eval::Passed
                } else {
                    Eval::Failed
                }
            }
            _ => Eval::NotApplicable,
        }
    }

    pub(crate) fn apply_arc_consistency(&self, assignment: &mut Assignment) -> PropagationStatus {
        match (assignment.value(self.lhs), assignment.value(self.rhs)) {
            (None, Some(fixed)) => assignment.intersect_with_value(self.lhs, fixed),
            (Some(fixed), None) => assignment.intersect_with_value(self.rhs, fixed),
            _ => Ok(()),
        }
    }
}

/// Enforces `target == first || target == second`.
#[derive(Clone, Copy, Debug)]
pub struct OrEqualityConstraint {
    pub(crate) target: VarId,
    pub(crate) first: VarId,
    pub(crate) second: VarId,
}

impl OrEqualityConstraint {
    pub fn new(target: VarId, first: VarId, second: VarId) -> OrEqualityConstraint {
        OrEqualityConstraint {
            target,
            first,
            second,
        }
    }

    pub(crate) fn evaluate(&self, inst_vars: &[Option<i32>]) -> Eval {
        let target = inst_vars[self.target.index()];
        let first = inst_vars[self.first.index()];
        let second = inst_vars[self.second.index()];

        match (target, first, second) {
            (Some(target), Some(first), Some(second)) => {
                if target == first || target == second {
                    Eval::Passed
                } else {
                    Eval::Failed
                }
            }
            _ => Eval::NotApplicable,
        }
    }

    /// Prunes only in the one informative configuration: the target is
    /// unassigned while both alternatives are fixed.
    pub(crate) fn apply_arc_consistency(&self, assignment: &mut Assignment) -> PropagationStatus {
        let target = assignment.value(self.target);
        let first = assignment.value(self.first);
        let second = assignment.value(self.second);

        match (target, first, second) {
            (None, Some(first), Some(second)) => {
                assignment.intersect_with_either(self.target, first, second)
            }
            _ => Ok(()),
        }
    }
}

/// Enforces `target == base + plus - minus`.
#[derive(Clone, Copy, Debug)]
pub struct CombinedEqualityConstraint {
    pub(crate) target: VarId,
    pub(crate) base: VarId,
    pub(crate) plus: VarId,
    pub(crate) minus: VarId,
}

impl CombinedEqualityConstraint {
    pub fn new(
        target: VarId,
        base: VarId,
        plus: VarId,
        minus: VarId,
    ) -> CombinedEqualityConstraint {
        CombinedEqualityConstraint {
            target,
            base,
            plus,
            minus,
        }
    }

    pub(crate) fn evaluate(&self, inst_vars: &[Option<i32>]) -> Eval {
        let target = inst_vars[self.target.index()];
        let base = inst_vars[self.base.index()];
        let plus = inst_vars[self.plus.index()];
        let minus = inst_vars[self.minus.index()];

        match (target, base, plus, minus) {
            (Some(target), Some(base), Some(plus), Some(minus)) => {
                if target == base + plus - minus {
                    Eval::Passed
                } else {
                    Eval::Failed
                }
            }
            _ => Eval::NotApplicable,
        }
    }

    pub(crate) fn apply_arc_consistency(&self, assignment: &mut Assignment) -> PropagationStatus {
        let target = assignment.value(self.target);
        let base = assignment.value(self.base);
        let plus = assignment.value(self.plus);
        let minus = assignment.value(self.minus);

        match (target, base, plus, minus) {
            (None, Some(base), Some(plus), Some(minus)) => {
                assignment.intersect_with_value(self.target, base + plus - minus)
            }
            _ => Ok(()),
        }
    }
}
