mod domain;
mod propagation_status;
#[cfg(feature = "stats")]
mod statistics;
mod variable;

pub use domain::Domain;
pub use domain::DomainIter;
pub(crate) use propagation_status::EmptyDomain;
pub(crate) use propagation_status::PropagationStatus;
#[cfg(feature = "stats")]
pub use statistics::Statistics;
pub(crate) use variable::ConstraintId;
pub use variable::VarId;
pub(crate) use variable::Variable;
