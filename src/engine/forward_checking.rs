use crate::engine::Assignment;
use crate::kabocha_assert_simple;
use crate::model::Csp;

impl Csp {
    /// Runs the forward-checking search, extending `assignment` towards a
    /// complete instantiation that satisfies every constraint of the model.
    ///
    /// Returns true on success, leaving the solution readable through
    /// [`Assignment::value`]. Returns false when no satisfying assignment
    /// exists below the current partial instantiation; the assignment is
    /// then exactly as it was on entry, so a fresh outermost call reports
    /// unsatisfiability without clobbering state.
    ///
    /// One checkpoint frame is opened per recursion level. After a candidate
    /// value fails, the frame undoes every domain reduction made on its
    /// behalf, including reductions made by deeper, already-unwound levels.
    pub fn forward_checking_step(&self, assignment: &mut Assignment) -> bool {
        kabocha_assert_simple!(
            self.is_finalised(),
            "the model must be finalised before it can be searched"
        );

        if assignment.is_complete() {
            return true;
        }

        assignment.push_frame();

        let vid = assignment.next_unassigned_var();
        let candidates: Vec<i32> = assignment.current_domain(vid).iter().collect();

        for value in candidates {
            assignment.assign(vid, value);

            if !assignment.validate_var_constraints(self, vid) {
                assignment.unassign(vid);
                continue;
            }

            let mut wiped_out = false;
            for &cid in &self.variables[vid.index()].linked_constraints {
                #[cfg(feature = "stats")]
                assignment.count_applied_arc();

                if self.constraints[cid.index()]
                    .apply_arc_consistency(assignment, vid)
                    .is_err()
                {
                    wiped_out = true;
                    break;
                }
            }

            if !wiped_out && self.forward_checking_step(assignment) {
                return true;
            }

            assignment.unassign(vid);
            assignment.restore_saved_domain_step();
        }

        assignment.pop_frame();
        false
    }
}
