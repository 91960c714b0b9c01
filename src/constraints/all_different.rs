use super::Eval;
use crate::basic_types::PropagationStatus;
use crate::basic_types::VarId;
use crate::engine::Assignment;

/// Enforces pairwise inequality among the listed variables.
#[derive(Clone, Debug)]
pub struct AllDifferentConstraint {
    pub(crate) variables: Box<[VarId]>,
}

impl AllDifferentConstraint {
    pub fn new(variables: Box<[VarId]>) -> AllDifferentConstraint {
        AllDifferentConstraint { variables }
    }

    /// Checks only the just-assigned member against the others; the pairs
    /// among earlier assignments were validated when those assignments were
    /// made.
    pub(crate) fn evaluate(&self, inst_vars: &[Option<i32>], last_assigned: VarId) -> Eval {
        if !self.variables.contains(&last_assigned) {
            return Eval::NotApplicable;
        }

        let Some(value) = inst_vars[last_assigned.index()] else {
            return Eval::NotApplicable;
        };

        for &var in self.variables.iter() {
            if var != last_assigned && inst_vars[var.index()] == Some(value) {
                return Eval::Failed;
            }
        }

        Eval::Passed
    }

    /// Removes the just-assigned value from the domain of every other
    /// still-unassigned member.
    pub(crate) fn apply_arc_consistency(
        &self,
        assignment: &mut Assignment,
        last_assigned: VarId,
    ) -> PropagationStatus {
        let Some(value) = assignment.value(last_assigned) else {
            return Ok(());
        };

        for &var in self.variables.iter() {
            if var == last_assigned || assignment.value(var).is_some() {
                continue;
            }

            assignment.remove_value(var, value)?;
        }

        Ok(())
    }
}
