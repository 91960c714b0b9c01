use log::debug;
use thiserror::Error;

use crate::basic_types::ConstraintId;
use crate::basic_types::Domain;
use crate::basic_types::VarId;
use crate::basic_types::Variable;
use crate::constraints::Constraint;
use crate::kabocha_assert_eq_simple;
use crate::kabocha_assert_simple;

/// A constraint satisfaction problem over integer variables.
///
/// A model is built in two stages. First, variables and constraints are
/// added; then [`Csp::finalise`] stitches every constraint into the reverse
/// index of the variables it references. A finalised model is immutable and
/// can be searched (see [`Csp::forward_checking_step`]) by any number of
/// [`crate::Assignment`]s, including concurrently.
#[derive(Debug, Default)]
pub struct Csp {
    pub(crate) variables: Vec<Variable>,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) domains: Vec<Domain>,
    finalised: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConstraintOperationError {
    #[error("adding the constraint failed because the model has already been finalised")]
    ModelFinalised,
    #[error("the constraint references a variable that is not part of the model")]
    UnknownVariable,
}

impl Csp {
    /// Creates a new variable with the half-open initial domain
    /// `[min, max)`. `max <= min` gives a variable with an empty domain,
    /// which makes any search touching it fail.
    pub fn new_integer_variable(&mut self, min: i32, max: i32) -> VarId {
        self.new_variable_with_domain(Domain::interval(min, max))
    }

    /// Creates a new variable with a caller-supplied initial domain.
    pub fn new_variable_with_domain(&mut self, domain: Domain) -> VarId {
        kabocha_assert_simple!(
            !self.finalised,
            "variables cannot be added to a finalised model"
        );
        domain.assert_invariants();

        let id = VarId::new(self.variables.len());
        self.variables.push(Variable::new(id));
        self.domains.push(domain);
        id
    }

    /// Creates a new variable fixed to `value`.
    pub fn new_fixed_variable(&mut self, value: i32) -> VarId {
        self.new_variable_with_domain(Domain::singleton(value))
    }

    /// Creates a new 0/1 variable.
    pub fn new_boolean_variable(&mut self) -> VarId {
        self.new_variable_with_domain(Domain::boolean())
    }

    /// Appends a constraint to the model. Fails on a model that has already
    /// been finalised and on constraints referencing unknown variables.
    pub fn add_constraint(
        &mut self,
        constraint: impl Into<Constraint>,
    ) -> Result<(), ConstraintOperationError> {
        if self.finalised {
            return Err(ConstraintOperationError::ModelFinalised);
        }

        let constraint = constraint.into();

        let mut unknown_variable = false;
        constraint
            .for_each_variable(|vid| unknown_variable |= vid.index() >= self.variables.len());
        if unknown_variable {
            return Err(ConstraintOperationError::UnknownVariable);
        }

        self.constraints.push(constraint);
        Ok(())
    }

    /// Freezes the model: every constraint is linked into the reverse index
    /// of the variables it references. Must be called exactly once, after
    /// all variables and constraints have been added and before any search.
    pub fn finalise(&mut self) {
        kabocha_assert_simple!(!self.finalised, "a model can only be finalised once");

        for (index, constraint) in self.constraints.iter().enumerate() {
            constraint.link_vars(ConstraintId::new(index), &mut self.variables);
        }
        self.finalised = true;

        for (index, variable) in self.variables.iter().enumerate() {
            kabocha_assert_eq_simple!(variable.id, VarId::new(index));
        }

        debug!(
            "finalised model with {} variables and {} constraints",
            self.variables.len(),
            self.constraints.len()
        );
    }

    pub(crate) fn is_finalised(&self) -> bool {
        self.finalised
    }

    /// The number of variables in the model.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// The ids of all variables of the model, in creation order.
    pub fn var_ids(&self) -> impl Iterator<Item = VarId> + '_ {
        (0..self.variables.len()).map(VarId::new)
    }

    /// The initial domain of `vid`, as given at variable creation.
    pub fn initial_domain(&self, vid: VarId) -> &Domain {
        &self.domains[vid.index()]
    }
}
