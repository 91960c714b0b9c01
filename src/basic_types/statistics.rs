/// Monotonic counters describing the work performed by the searches run on a
/// single [`crate::Assignment`]. The counters accumulate across searches and
/// are not cleared by [`crate::Assignment::reset`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    /// The number of variable assignments made by the search, including ones
    /// that were later undone.
    pub assigned_vars: u64,
    /// The number of constraint evaluations performed while validating
    /// candidate values.
    pub validated_constraints: u64,
    /// The number of arc-consistency applications.
    pub applied_arcs: u64,
}
