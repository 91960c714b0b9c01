//! The constraint family of the solver.
//!
//! Every constraint exposes the same three operations: linking itself into
//! the reverse index of the variables it references, checking feasibility
//! against a (partial) instantiation, and tightening the current domains of
//! its still-unassigned variables after one of its variables was assigned.
//! The family is a tagged union so that the model can store a heterogeneous
//! constraint collection by value.

mod all_different;
mod conditional;
mod equality;
mod op;
mod or_range;

pub use all_different::AllDifferentConstraint;
pub use conditional::ConditionalOpConstraint;
pub use equality::CombinedEqualityConstraint;
pub use equality::EqualityConstraint;
pub use equality::OrEqualityConstraint;
pub use op::CompOp;
pub use op::OpConstraint;
pub use or_range::OrRangeConstraint;

use crate::basic_types::ConstraintId;
use crate::basic_types::PropagationStatus;
use crate::basic_types::VarId;
use crate::basic_types::Variable;
use crate::engine::Assignment;

/// The outcome of checking a constraint against a partial instantiation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Eval {
    /// Some referenced variable is still unassigned; nothing can be
    /// concluded yet.
    NotApplicable,
    /// The constraint holds under the current instantiation.
    Passed,
    /// The constraint is violated under the current instantiation.
    Failed,
}

/// A constraint of the model. Constraints are immutable once constructed.
#[derive(Clone, Debug)]
pub enum Constraint {
    Op(OpConstraint),
    ConditionalOp(ConditionalOpConstraint),
    Equality(EqualityConstraint),
    OrEquality(OrEqualityConstraint),
    CombinedEquality(CombinedEqualityConstraint),
    OrRange(OrRangeConstraint),
    AllDifferent(AllDifferentConstraint),
}

impl From<OpConstraint> for Constraint {
    fn from(constraint: OpConstraint) -> Constraint {
        Constraint::Op(constraint)
    }
}

impl From<ConditionalOpConstraint> for Constraint {
    fn from(constraint: ConditionalOpConstraint) -> Constraint {
        Constraint::ConditionalOp(constraint)
    }
}

impl From<EqualityConstraint> for Constraint {
    fn from(constraint: EqualityConstraint) -> Constraint {
        Constraint::Equality(constraint)
    }
}

impl From<OrEqualityConstraint> for Constraint {
    fn from(constraint: OrEqualityConstraint) -> Constraint {
        Constraint::OrEquality(constraint)
    }
}

impl From<CombinedEqualityConstraint> for Constraint {
    fn from(constraint: CombinedEqualityConstraint) -> Constraint {
        Constraint::CombinedEquality(constraint)
    }
}

impl From<OrRangeConstraint> for Constraint {
    fn from(constraint: OrRangeConstraint) -> Constraint {
        Constraint::OrRange(constraint)
    }
}

impl From<AllDifferentConstraint> for Constraint {
    fn from(constraint: AllDifferentConstraint) -> Constraint {
        Constraint::AllDifferent(constraint)
    }
}

impl Constraint {
    /// Visits every variable referenced by this constraint, in declaration
    /// order.
    pub(crate) fn for_each_variable(&self, mut visit: impl FnMut(VarId)) {
        match self {
            Constraint::Op(constraint) => {
                visit(constraint.lhs);
                visit(constraint.rhs);
            }
            Constraint::ConditionalOp(constraint) => {
                visit(constraint.comparison.lhs);
                visit(constraint.comparison.rhs);
                visit(constraint.guard);
            }
            Constraint::Equality(constraint) => {
                visit(constraint.lhs);
                visit(constraint.rhs);
            }
            Constraint::OrEquality(constraint) => {
                visit(constraint.target);
                visit(constraint.first);
                visit(constraint.second);
            }
            Constraint::CombinedEquality(constraint) => {
                visit(constraint.target);
                visit(constraint.base);
                visit(constraint.plus);
                visit(constraint.minus);
            }
            Constraint::OrRange(constraint) => {
                visit(constraint.first);
                visit(constraint.second);
            }
            Constraint::AllDifferent(constraint) => {
                constraint.variables.iter().copied().for_each(&mut visit);
            }
        }
    }

    /// Pushes `cid` into the reverse index of every variable this constraint
    /// references. Called exactly once per constraint, when the model is
    /// finalised.
    pub(crate) fn link_vars(&self, cid: ConstraintId, variables: &mut [Variable]) {
        self.for_each_variable(|vid| variables[vid.index()].linked_constraints.push(cid));
    }

    /// Checks feasibility of this constraint under the given instantiation.
    /// Pure: reads only its arguments.
    pub(crate) fn evaluate(&self, inst_vars: &[Option<i32>], last_assigned: VarId) -> Eval {
        match self {
            Constraint::Op(constraint) => constraint.evaluate(inst_vars),
            Constraint::ConditionalOp(constraint) => constraint.evaluate(inst_vars),
            Constraint::Equality(constraint) => constraint.evaluate(inst_vars),
            Constraint::OrEquality(constraint) => constraint.evaluate(inst_vars),
            Constraint::CombinedEquality(constraint) => constraint.evaluate(inst_vars),
            Constraint::OrRange(constraint) => constraint.evaluate(inst_vars),
            Constraint::AllDifferent(constraint) => constraint.evaluate(inst_vars, last_assigned),
        }
    }

    /// Tightens the current domains of this constraint's still-unassigned
    /// variables after `last_assigned` was given a value. Every domain
    /// mutation checkpoints the touched domain first; a wipe-out is reported
    /// through the error variant.
    pub(crate) fn apply_arc_consistency(
        &self,
        assignment: &mut Assignment,
        last_assigned: VarId,
    ) -> PropagationStatus {
        match self {
            Constraint::Op(constraint) => constraint.apply_arc_consistency(assignment),
            Constraint::ConditionalOp(constraint) => constraint.apply_arc_consistency(assignment),
            Constraint::Equality(constraint) => constraint.apply_arc_consistency(assignment),
            Constraint::OrEquality(constraint) => constraint.apply_arc_consistency(assignment),
            Constraint::CombinedEquality(constraint) => {
                constraint.apply_arc_consistency(assignment)
            }
            Constraint::OrRange(constraint) => constraint.apply_arc_consistency(assignment),
            Constraint::AllDifferent(constraint) => {
                constraint.apply_arc_consistency(assignment, last_assigned)
            }
        }
    }
}
