use log::warn;

use crate::basic_types::Domain;
use crate::basic_types::EmptyDomain;
use crate::basic_types::PropagationStatus;
#[cfg(feature = "stats")]
use crate::basic_types::Statistics;
use crate::basic_types::VarId;
use crate::constraints::Eval;
use crate::kabocha_assert_moderate;
use crate::kabocha_assert_simple;
use crate::model::Csp;

/// The mutable state of one search over a [`Csp`].
///
/// An assignment tracks which variables hold which values, the current
/// (propagation-reduced) domain of every variable, and a stack of domain
/// checkpoints with one frame per recursion level of the search. The model
/// itself is never mutated; running several searches against the same model
/// concurrently is fine as long as each has its own assignment.
#[derive(Debug, Default)]
pub struct Assignment {
    inst_vars: Vec<Option<i32>>,
    current_domains: Vec<Domain>,
    saved_domains: Vec<SavedDomainFrame>,
    assigned_count: usize,
    assign_order: Vec<VarId>,
    #[cfg(feature = "stats")]
    stats: Statistics,
}

/// A checkpointed copy of one variable's domain, taken before the first
/// mutation of that domain within a frame.
#[derive(Clone, Debug)]
struct SavedDomain {
    var: VarId,
    domain: Domain,
}

/// The checkpoints of one recursion level of the search. Each variable
/// appears at most once; the first write wins, so the frame always holds the
/// domain as it was when the frame was opened.
#[derive(Clone, Debug, Default)]
struct SavedDomainFrame {
    domains: Vec<SavedDomain>,
}

impl Assignment {
    /// (Re)initialises this assignment for a search over `csp`: no variable
    /// is instantiated, every current domain is a copy of the model's
    /// initial domain, and the assignment order is fixed to ascending
    /// initial-domain size (variable id as tie-break), so that fixed and
    /// tightly-domained variables are tried first.
    pub fn reset(&mut self, csp: &Csp) {
        kabocha_assert_simple!(
            csp.is_finalised(),
            "the model must be finalised before it can be searched"
        );

        let num_variables = csp.variable_count();

        self.inst_vars.clear();
        self.inst_vars.resize(num_variables, None);

        self.current_domains.clear();
        self.current_domains
            .extend(csp.var_ids().map(|vid| csp.initial_domain(vid).clone()));

        self.saved_domains.clear();
        self.assigned_count = 0;

        self.assign_order = csp.var_ids().collect();
        let domains = &self.current_domains;
        self.assign_order
            .sort_by_key(|&vid| (domains[vid.index()].size(), vid));

        for &vid in &self.assign_order {
            if self.current_domains[vid.index()].is_empty() {
                warn!("variable {vid} starts with an empty domain; the problem is unsatisfiable");
            }
        }
    }

    /// True once every variable holds a value.
    pub fn is_complete(&self) -> bool {
        self.assigned_count == self.inst_vars.len()
    }

    /// The value held by `vid`, or `None` while it is unassigned.
    pub fn value(&self, vid: VarId) -> Option<i32> {
        self.inst_vars[vid.index()]
    }

    /// The current, propagation-reduced domain of `vid`.
    pub fn current_domain(&self, vid: VarId) -> &Domain {
        &self.current_domains[vid.index()]
    }

    /// The counters accumulated by all searches run on this assignment.
    #[cfg(feature = "stats")]
    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    /// The next variable to branch on. Assignments strictly follow
    /// `assign_order`, and backtracking only ever unassigns the tail, so
    /// indexing by the number of assigned variables is enough.
    pub(crate) fn next_unassigned_var(&self) -> VarId {
        let vid = self.assign_order[self.assigned_count];
        kabocha_assert_moderate!(self.inst_vars[vid.index()].is_none());
        vid
    }

    pub(crate) fn assign(&mut self, vid: VarId, value: i32) {
        kabocha_assert_moderate!(self.inst_vars[vid.index()].is_none());
        self.inst_vars[vid.index()] = Some(value);
        self.assigned_count += 1;
        #[cfg(feature = "stats")]
        {
            self.stats.assigned_vars += 1;
        }
    }

    pub(crate) fn unassign(&mut self, vid: VarId) {
        kabocha_assert_moderate!(self.inst_vars[vid.index()].is_some());
        self.inst_vars[vid.index()] = None;
        self.assigned_count -= 1;
    }

    /// Checks every constraint `vid` participates in, in insertion order.
    /// Returns false as soon as one evaluates to [`Eval::Failed`]; both
    /// [`Eval::Passed`] and [`Eval::NotApplicable`] continue.
    pub(crate) fn validate_var_constraints(&mut self, csp: &Csp, vid: VarId) -> bool {
        for &cid in &csp.variables[vid.index()].linked_constraints {
            #[cfg(feature = "stats")]
            {
                self.stats.validated_constraints += 1;
            }

            if csp.constraints[cid.index()].evaluate(&self.inst_vars, vid) == Eval::Failed {
                return false;
            }
        }

        true
    }

    #[cfg(feature = "stats")]
    pub(crate) fn count_applied_arc(&mut self) {
        self.stats.applied_arcs += 1;
    }

    /// Opens a checkpoint frame for one recursion level of the search.
    pub(crate) fn push_frame(&mut self) {
        self.saved_domains.push(SavedDomainFrame::default());
    }

    /// Discards the top checkpoint frame without restoring it.
    pub(crate) fn pop_frame(&mut self) {
        let _ = self.saved_domains.pop();
    }

    /// Snapshots the current domain of `vid` into the top frame, unless the
    /// frame already holds a snapshot for `vid` (first-write-wins).
    pub(crate) fn ensure_saved_domain(&mut self, vid: VarId) {
        let frame = self
            .saved_domains
            .last_mut()
            .expect("domains are only mutated inside a checkpoint frame");

        if frame.domains.iter().any(|saved| saved.var == vid) {
            return;
        }

        frame.domains.push(SavedDomain {
            var: vid,
            domain: self.current_domains[vid.index()].clone(),
        });
    }

    /// Copies every snapshot of the top frame back into the current domains.
    /// The frame itself stays in place; the same frame is restored again if
    /// the next candidate value also fails.
    pub(crate) fn restore_saved_domain_step(&mut self) {
        let frame = self
            .saved_domains
            .last()
            .expect("restoration only happens inside a checkpoint frame");

        for saved in &frame.domains {
            self.current_domains[saved.var.index()] = saved.domain.clone();
        }
    }

    /// Restricts the domain of `vid` to `{value}` if feasible.
    pub(crate) fn intersect_with_value(&mut self, vid: VarId, value: i32) -> PropagationStatus {
        self.ensure_saved_domain(vid);
        let domain = &mut self.current_domains[vid.index()];
        domain.intersect_with_value(value);
        if domain.is_empty() {
            Err(EmptyDomain)
        } else {
            Ok(())
        }
    }

    /// Restricts the domain of `vid` to the feasible subset of
    /// `{first, second}`.
    pub(crate) fn intersect_with_either(
        &mut self,
        vid: VarId,
        first: i32,
        second: i32,
    ) -> PropagationStatus {
        self.ensure_saved_domain(vid);
        let domain = &mut self.current_domains[vid.index()];
        domain.intersect_with_either(first, second);
        if domain.is_empty() {
            Err(EmptyDomain)
        } else {
            Ok(())
        }
    }

    /// Removes `value` from the domain of `vid`.
    pub(crate) fn remove_value(&mut self, vid: VarId, value: i32) -> PropagationStatus {
        self.ensure_saved_domain(vid);
        let domain = &mut self.current_domains[vid.index()];
        domain.remove_value(value);
        if domain.is_empty() {
            Err(EmptyDomain)
        } else {
            Ok(())
        }
    }

    /// Removes every value `>= bound` from the domain of `vid`.
    pub(crate) fn remove_at_least(&mut self, vid: VarId, bound: i32) -> PropagationStatus {
        self.ensure_saved_domain(vid);
        let domain = &mut self.current_domains[vid.index()];
        domain.remove_at_least(bound);
        if domain.is_empty() {
            Err(EmptyDomain)
        } else {
            Ok(())
        }
    }

    /// Removes every value `< bound` from the domain of `vid`.
    pub(crate) fn remove_below(&mut self, vid: VarId, bound: i32) -> PropagationStatus {
        self.ensure_saved_domain(vid);
        let domain = &mut self.current_domains[vid.index()];
        domain.remove_below(bound);
        if domain.is_empty() {
            Err(EmptyDomain)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Assignment;
    use crate::basic_types::Domain;
    use crate::basic_types::VarId;
    use crate::model::Csp;

    fn setup() -> (Csp, Assignment) {
        let mut csp = Csp::default();
        let _wide = csp.new_integer_variable(0, 100);
        let _fixed = csp.new_fixed_variable(7);
        let _boolean = csp.new_boolean_variable();
        let _narrow = csp.new_integer_variable(0, 2);
        csp.finalise();

        let mut assignment = Assignment::default();
        assignment.reset(&csp);
        (csp, assignment)
    }

    #[test]
    fn reset_orders_variables_by_initial_domain_size() {
        let (_csp, assignment) = setup();

        // Sizes are 100, 1, 2, 2; ties break on the smaller id.
        assert_eq!(assignment.next_unassigned_var(), VarId::new(1));

        let mut assignment = assignment;
        assignment.assign(VarId::new(1), 7);
        assert_eq!(assignment.next_unassigned_var(), VarId::new(2));
        assignment.assign(VarId::new(2), 0);
        assert_eq!(assignment.next_unassigned_var(), VarId::new(3));
        assignment.assign(VarId::new(3), 0);
        assert_eq!(assignment.next_unassigned_var(), VarId::new(0));
    }

    #[test]
    fn assign_then_unassign_restores_the_prior_state() {
        let (_csp, mut assignment) = setup();
        let vid = assignment.next_unassigned_var();

        assert!(!assignment.is_complete());
        assert_eq!(assignment.value(vid), None);

        assignment.assign(vid, 7);
        assert_eq!(assignment.value(vid), Some(7));

        assignment.unassign(vid);
        assert_eq!(assignment.value(vid), None);
        assert_eq!(assignment.next_unassigned_var(), vid);
    }

    #[test]
    fn completion_is_reached_after_every_variable_is_assigned() {
        let (csp, mut assignment) = setup();

        for vid in csp.var_ids() {
            assert!(!assignment.is_complete());
            assignment.assign(vid, 0);
        }
        assert!(assignment.is_complete());
    }

    #[test]
    fn saving_a_domain_twice_keeps_the_first_snapshot() {
        let (_csp, mut assignment) = setup();
        let wide = VarId::new(0);

        assignment.push_frame();
        assignment
            .remove_at_least(wide, 50)
            .expect("plenty of values below 50");
        // A second mutation in the same frame must not overwrite the
        // snapshot taken by the first.
        assignment
            .remove_at_least(wide, 10)
            .expect("plenty of values below 10");

        assert_eq!(assignment.current_domain(wide), &Domain::interval(0, 10));
        assignment.restore_saved_domain_step();
        assert_eq!(assignment.current_domain(wide), &Domain::interval(0, 100));
    }

    #[test]
    fn restoring_does_not_pop_the_frame() {
        let (_csp, mut assignment) = setup();
        let wide = VarId::new(0);

        assignment.push_frame();
        assignment
            .remove_below(wide, 90)
            .expect("plenty of values from 90");
        assignment.restore_saved_domain_step();

        // The frame is still in place, so the snapshot is reused.
        assignment
            .remove_below(wide, 95)
            .expect("plenty of values from 95");
        assignment.restore_saved_domain_step();
        assert_eq!(assignment.current_domain(wide), &Domain::interval(0, 100));

        assignment.pop_frame();
    }

    #[test]
    fn restoration_covers_every_variable_touched_in_the_frame() {
        let (_csp, mut assignment) = setup();
        let wide = VarId::new(0);
        let narrow = VarId::new(3);

        assignment.push_frame();
        assignment.intersect_with_value(wide, 42).expect("42 is feasible");
        assignment.remove_value(narrow, 0).expect("1 remains");

        assignment.restore_saved_domain_step();
        assert_eq!(assignment.current_domain(wide), &Domain::interval(0, 100));
        assert_eq!(assignment.current_domain(narrow), &Domain::interval(0, 2));
    }

    #[test]
    fn wiping_out_a_domain_is_reported_and_restorable() {
        let (_csp, mut assignment) = setup();
        let narrow = VarId::new(3);

        assignment.push_frame();
        assert!(assignment.remove_below(narrow, 10).is_err());
        assert!(assignment.current_domain(narrow).is_empty());

        assignment.restore_saved_domain_step();
        assert_eq!(assignment.current_domain(narrow), &Domain::interval(0, 2));
    }

    #[test]
    fn reset_restores_a_used_assignment_to_its_initial_state() {
        let (csp, mut assignment) = setup();

        assignment.push_frame();
        let vid = assignment.next_unassigned_var();
        assignment.assign(vid, 7);
        assignment.remove_value(VarId::new(0), 50).expect("99 values left");

        assignment.reset(&csp);
        assert!(!assignment.is_complete());
        for vid in csp.var_ids() {
            assert_eq!(assignment.value(vid), None);
            assert_eq!(assignment.current_domain(vid), csp.initial_domain(vid));
        }
    }

    #[cfg(feature = "stats")]
    #[test]
    fn assignment_counter_tracks_assignments() {
        let (_csp, mut assignment) = setup();
        let vid = assignment.next_unassigned_var();

        assignment.assign(vid, 7);
        assignment.unassign(vid);
        assignment.assign(vid, 7);

        assert_eq!(assignment.statistics().assigned_vars, 2);
    }
}
