use super::Eval;
use crate::basic_types::PropagationStatus;
use crate::basic_types::VarId;
use crate::engine::Assignment;

/// The comparison operators usable in an [`OpConstraint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompOp {
    Equal,
    NotEqual,
    GreaterEqual,
    Greater,
    LessEqual,
    Less,
}

impl CompOp {
    pub(crate) fn holds(self, lhs: i32, rhs: i32) -> bool {
        match self {
            CompOp::Equal => lhs == rhs,
            CompOp::NotEqual => lhs != rhs,
            CompOp::GreaterEqual => lhs >= rhs,
            CompOp::Greater => lhs > rhs,
            CompOp::LessEqual => lhs <= rhs,
            CompOp::Less => lhs < rhs,
        }
    }

    /// The operator with its sides swapped: `a op b` holds exactly when
    /// `b op.mirrored() a` holds.
    fn mirrored(self) -> CompOp {
        match self {
            CompOp::Equal => CompOp::Equal,
            CompOp::NotEqual => CompOp::NotEqual,
            CompOp::GreaterEqual => CompOp::LessEqual,
            CompOp::Greater => CompOp::Less,
            CompOp::LessEqual => CompOp::GreaterEqual,
            CompOp::Less => CompOp::Greater,
        }
    }
}

/// Enforces `lhs op (rhs + offset)` over two variables.
#[derive(Clone, Copy, Debug)]
pub struct OpConstraint {
    pub(crate) lhs: VarId,
    pub(crate) rhs: VarId,
    pub(crate) op: CompOp,
    pub(crate) offset: i32,
}

impl OpConstraint {
    pub fn new(lhs: VarId, rhs: VarId, op: CompOp, offset: i32) -> OpConstraint {
        OpConstraint {
            lhs,
            rhs,
            op,
            offset,
        }
    }

    pub(crate) fn evaluate(&self, inst_vars: &[Option<i32>]) -> Eval {
        match (inst_vars[self.lhs.index()], inst_vars[self.rhs.index()]) {
            (Some(lhs), Some(rhs)) => {
                if self.op.holds(lhs, rhs + self.offset) {
                    Eval::Passed
                } else {
                    Eval::Failed
                }
            }
            _ => Eval::NotApplicable,
        }
    }

    pub(crate) fn apply_arc_consistency(&self, assignment: &mut Assignment) -> PropagationStatus {
        self.prune_operands(assignment)
    }

    /// Reduces the unassigned side (if there is exactly one) to the values
    /// compatible with the fixed side. When `lhs` is unassigned the bound is
    /// `rhs + offset`; when `rhs` is unassigned it is `lhs - offset` with
    /// the operator mirrored.
    pub(crate) fn prune_operands(&self, assignment: &mut Assignment) -> PropagationStatus {
        match (assignment.value(self.lhs), assignment.value(self.rhs)) {
            (None, Some(fixed)) => {
                prune(assignment, self.lhs, self.op, fixed + self.offset)
            }
            (Some(fixed), None) => {
                prune(assignment, self.rhs, self.op.mirrored(), fixed - self.offset)
            }
            _ => Ok(()),
        }
    }
}

fn prune(assignment: &mut Assignment, vid: VarId, op: CompOp, bound: i32) -> PropagationStatus {
    match op {
        CompOp::Equal => assignment.intersect_with_value(vid, bound),
        CompOp::NotEqual => assignment.remove_value(vid, bound),
        CompOp::GreaterEqual => assignment.remove_below(vid, bound),
        CompOp::Greater => assignment.remove_below(vid, bound + 1),
        CompOp::LessEqual => assignment.remove_at_least(vid, bound + 1),
        CompOp::Less => assignment.remove_at_least(vid, bound),
    }
}
