//! A forward-checking solver for finite-domain constraint satisfaction
//! problems.
//!
//! A problem is described as a [`Csp`]: integer variables with finite
//! domains, and constraints over them. Once the model is finalised, the
//! solver searches for a single satisfying assignment by depth-first
//! backtracking: each assignment is validated against the constraints of the
//! assigned variable, and arc consistency then prunes the domains of the
//! not-yet-assigned variables so that dead branches are abandoned early.
//!
//! ```
//! use kabocha::Assignment;
//! use kabocha::CompOp;
//! use kabocha::Csp;
//! use kabocha::OpConstraint;
//!
//! let mut csp = Csp::default();
//! let x = csp.new_integer_variable(0, 10);
//! let limit = csp.new_fixed_variable(6);
//! csp.add_constraint(OpConstraint::new(x, limit, CompOp::Less, 0))?;
//! csp.finalise();
//!
//! let mut assignment = Assignment::default();
//! assignment.reset(&csp);
//!
//! assert!(csp.forward_checking_step(&mut assignment));
//! assert!(assignment.value(x).unwrap() < 6);
//! # Ok::<(), kabocha::ConstraintOperationError>(())
//! ```
//!
//! The search is deterministic: variables are assigned in ascending
//! initial-domain size, values are tried in domain storage order, and
//! constraints fire in insertion order, so a fixed model always produces the
//! same first solution.

pub mod asserts;
mod basic_types;
mod constraints;
mod engine;
mod model;

pub use basic_types::Domain;
pub use basic_types::DomainIter;
#[cfg(feature = "stats")]
pub use basic_types::Statistics;
pub use basic_types::VarId;
pub use constraints::AllDifferentConstraint;
pub use constraints::CombinedEqualityConstraint;
pub use constraints::CompOp;
pub use constraints::ConditionalOpConstraint;
pub use constraints::Constraint;
pub use constraints::EqualityConstraint;
pub use constraints::OpConstraint;
pub use constraints::OrEqualityConstraint;
pub use constraints::OrRangeConstraint;
pub use engine::Assignment;
pub use model::ConstraintOperationError;
pub use model::Csp;
