use super::CompOp;
use super::Eval;
use super::OpConstraint;
use crate::basic_types::PropagationStatus;
use crate::basic_types::VarId;
use crate::engine::Assignment;

/// A comparison that is only enforced when a guard variable takes an
/// activating value.
///
/// The guard activates the comparison when it is non-zero
/// ([`ConditionalOpConstraint::enforce_if`]) or when it is zero
/// ([`ConditionalOpConstraint::enforce_if_not`]). While the guard is
/// unassigned the constraint can still prune: if both operands are fixed and
/// the comparison is violated, every activating value is removed from the
/// guard's domain.
#[derive(Clone, Copy, Debug)]
pub struct ConditionalOpConstraint {
    pub(crate) guard: VarId,
    /// Whether a non-zero guard activates the comparison.
    pub(crate) active_when_set: bool,
    pub(crate) comparison: OpConstraint,
}

impl ConditionalOpConstraint {
    /// Enforces `lhs op (rhs + offset)` whenever `guard` is non-zero.
    pub fn enforce_if(
        guard: VarId,
        lhs: VarId,
        rhs: VarId,
        op: CompOp,
        offset: i32,
    ) -> ConditionalOpConstraint {
        ConditionalOpConstraint {
            guard,
            active_when_set: true,
            comparison: OpConstraint::new(lhs, rhs, op, offset),
        }
    }

    /// Enforces `lhs op (rhs + offset)` whenever `guard` is zero.
    pub fn enforce_if_not(
        guard: VarId,
        lhs: VarId,
        rhs: VarId,
        op: CompOp,
        offset: i32,
    ) -> ConditionalOpConstraint {
        ConditionalOpConstraint {
            guard,
            active_when_set: false,
            comparison: OpConstraint::new(lhs, rhs, op, offset),
        }
    }

    fn is_activating(&self, guard_value: i32) -> bool {
        if self.active_when_set {
            guard_value != 0
        } else {
            guard_value == 0
        }
    }

    pub(crate) fn evaluate(&self, inst_vars: &[Option<i32>]) -> Eval {
        let Some(guard_value) = inst_vars[self.guard.index()] else {
            return Eval::NotApplicable;
        };

        if !self.is_activating(guard_value) {
            return Eval::Passed;
        }

        self.comparison.evaluate(inst_vars)
    }

    pub(crate) fn apply_arc_consistency(&self, assignment: &mut Assignment) -> PropagationStatus {
        match assignment.value(self.guard) {
            Some(guard_value) => {
                if self.is_activating(guard_value) {
                    self.comparison.prune_operands(assignment)
                } else {
                    Ok(())
                }
            }
            None => {
                let lhs = assignment.value(self.comparison.lhs);
                let rhs = assignment.value(self.comparison.rhs);
                let (Some(lhs), Some(rhs)) = (lhs, rhs) else {
                    return Ok(());
                };

                if self.comparison.op.holds(lhs, rhs + self.comparison.offset) {
                    return Ok(());
                }

                // The comparison is already violated, so the guard may only
                // take deactivating values.
                if self.active_when_set {
                    assignment.intersect_with_value(self.guard, 0)
                } else {
                    assignment.remove_value(self.guard, 0)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CompOp;
    use super::ConditionalOpConstraint;
    use crate::basic_types::Domain;
    use crate::basic_types::VarId;
    use crate::constraints::Eval;
    use crate::engine::Assignment;
    use crate::model::Csp;

    fn setup() -> (Csp, Assignment, [VarId; 3]) {
        let mut csp = Csp::default();
        let guard = csp.new_boolean_variable();
        let x = csp.new_integer_variable(0, 10);
        let y = csp.new_integer_variable(0, 10);
        csp.finalise();

        let mut assignment = Assignment::default();
        assignment.reset(&csp);
        assignment.push_frame();
        (csp, assignment, [guard, x, y])
    }

    #[test]
    fn unassigned_guard_is_not_applicable() {
        let (_csp, _assignment, [guard, x, y]) = setup();
        let constraint = ConditionalOpConstraint::enforce_if(guard, x, y, CompOp::Equal, 0);

        assert_eq!(
            constraint.evaluate(&[None, Some(1), Some(2)]),
            Eval::NotApplicable
        );
    }

    #[test]
    fn deactivating_guard_passes_a_violated_comparison() {
        let (_csp, _assignment, [guard, x, y]) = setup();

        let enforce_if = ConditionalOpConstraint::enforce_if(guard, x, y, CompOp::Equal, 0);
        assert_eq!(enforce_if.evaluate(&[Some(0), Some(1), Some(2)]), Eval::Passed);
        assert_eq!(enforce_if.evaluate(&[Some(1), Some(1), Some(2)]), Eval::Failed);
        assert_eq!(enforce_if.evaluate(&[Some(1), Some(2), Some(2)]), Eval::Passed);

        let enforce_if_not = ConditionalOpConstraint::enforce_if_not(guard, x, y, CompOp::Equal, 0);
        assert_eq!(
            enforce_if_not.evaluate(&[Some(1), Some(1), Some(2)]),
            Eval::Passed
        );
        assert_eq!(
            enforce_if_not.evaluate(&[Some(0), Some(1), Some(2)]),
            Eval::Failed
        );
    }

    #[test]
    fn violated_comparison_restricts_the_guard_to_deactivating_values() {
        let (_csp, mut assignment, [guard, x, y]) = setup();

        assignment.assign(x, 3);
        assignment.assign(y, 7);

        let constraint = ConditionalOpConstraint::enforce_if(guard, x, y, CompOp::Equal, 0);
        assert!(constraint.apply_arc_consistency(&mut assignment).is_ok());
        assert_eq!(assignment.current_domain(guard), &Domain::Values(vec![0]));
    }

    #[test]
    fn violated_comparison_removes_zero_from_an_if_not_guard() {
        let (_csp, mut assignment, [guard, x, y]) = setup();

        assignment.assign(x, 3);
        assignment.assign(y, 7);

        let constraint = ConditionalOpConstraint::enforce_if_not(guard, x, y, CompOp::Equal, 0);
        assert!(constraint.apply_arc_consistency(&mut assignment).is_ok());
        assert_eq!(assignment.current_domain(guard), &Domain::Values(vec![1]));
    }

    #[test]
    fn satisfied_comparison_leaves_the_guard_alone() {
        let (_csp, mut assignment, [guard, x, y]) = setup();

        assignment.assign(x, 7);
        assignment.assign(y, 7);

        let constraint = ConditionalOpConstraint::enforce_if(guard, x, y, CompOp::Equal, 0);
        assert!(constraint.apply_arc_consistency(&mut assignment).is_ok());
        assert_eq!(assignment.current_domain(guard), &Domain::boolean());
    }

    #[test]
    fn activating_guard_prunes_the_unassigned_operand() {
        let (_csp, mut assignment, [guard, x, y]) = setup();

        assignment.assign(guard, 1);
        assignment.assign(y, 4);

        let constraint = ConditionalOpConstraint::enforce_if(guard, x, y, CompOp::Greater, 1);
        assert!(constraint.apply_arc_consistency(&mut assignment).is_ok());

        // x > 4 + 1
        let remaining: Vec<i32> = assignment.current_domain(x).iter().collect();
        assert_eq!(remaining, vec![6, 7, 8, 9]);
    }

    #[test]
    fn deactivated_guard_suppresses_operand_pruning() {
        let (_csp, mut assignment, [guard, x, y]) = setup();

        assignment.assign(guard, 0);
        assignment.assign(y, 4);

        let constraint = ConditionalOpConstraint::enforce_if(guard, x, y, CompOp::Greater, 1);
        assert!(constraint.apply_arc_consistency(&mut assignment).is_ok());
        assert_eq!(assignment.current_domain(x), &Domain::interval(0, 10));
    }
}
