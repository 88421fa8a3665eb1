use std::fmt::{self, Display};

use crate::health_state::{HealthState, DIAGNOSED_CAPACITY};

/// One simulated agent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Individual {
    state: HealthState,
    diagnosed: bool,
}

impl Individual {
    #[must_use]
    pub fn new(state: HealthState) -> Self {
        Individual {
            state,
            diagnosed: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> &HealthState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut HealthState {
        &mut self.state
    }

    /// Replaces the health state wholesale. The diagnosis flag is left untouched.
    pub fn set_state(&mut self, state: HealthState) {
        self.state = state;
    }

    #[must_use]
    pub fn is_diagnosed(&self) -> bool {
        self.diagnosed
    }

    /// Marks the individual as diagnosed and isolates it by dropping its interaction capacity.
    /// The flag never goes back to false.
    pub fn diagnose(&mut self) {
        self.diagnosed = true;
        self.state.set_interaction_capacity(DIAGNOSED_CAPACITY);
    }
}

impl Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<Individual, State: {}", self.state)?;
        if self.diagnosed {
            write!(f, ", diagnosed")?;
        }
        write!(f, ">")
    }
}
