use super::Eval;
use crate::basic_types::PropagationStatus;
use crate::basic_types::VarId;
use crate::engine::Assignment;

/// Enforces `first ∈ [min, max) || second ∈ [min, max)`.
#[derive(Clone, Copy, Debug)]
pub struct OrRangeConstraint {
    pub(crate) first: VarId,
    pub(crate) second: VarId,
    pub(crate) min: i32,
    pub(crate) max: i32,
}

impl OrRangeConstraint {
    /// The range is half-open: `min` is included, `max` is not.
    pub fn new(first: VarId, second: VarId, min: i32, max: i32) -> OrRangeConstraint {
        OrRangeConstraint {
            first,
            second,
            min,
            max,
        }
    }

    fn in_range(&self, value: i32) -> bool {
        self.min <= value && value < self.max
    }

    pub(crate) fn evaluate(&self, inst_vars: &[Option<i32>]) -> Eval {
        match (
            inst_vars[self.first.index()],
            inst_vars[self.second.index()],
        ) {
            (Some(first), Some(second)) => {
                if self.in_range(first) || self.in_range(second) {
                    Eval::Passed
                } else {
                    Eval::Failed
                }
            }
            _ => Eval::NotApplicable,
        }
    }

    /// This constraint does not prune; it is checked through
    /// [`OrRangeConstraint::evaluate`] once both variables are fixed.
    pub(crate) fn apply_arc_consistency(&self, _assignment: &mut Assignment) -> PropagationStatus {
        Ok(())
    }
}
