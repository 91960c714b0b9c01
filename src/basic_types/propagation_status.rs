/// The result of applying arc consistency for a single constraint. Either the
/// affected domains remain non-empty, or some variable was left without any
/// feasible value and the current search branch must be abandoned.
pub(crate) type PropagationStatus = Result<(), EmptyDomain>;

/// Witness that a domain operation removed the last value from some
/// variable's current domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct EmptyDomain;
