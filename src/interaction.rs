//! How many contact rounds happen in a day.
//!
//! The engine only needs the [`InteractionModel`] capability: given the current population size,
//! the day's activity level and the population's space, return a number of rounds. Any closure
//! `Fn(usize, f64, usize) -> usize` is a model. [`Interaction`] names a closure,
//! [`ConstantInteractions`] is the trivial model, and [`InteractionConfig`] is the form used by
//! parameter files.
use std::fmt::{self, Debug, Display};

use serde_derive::{Deserialize, Serialize};

use crate::error::EpisimError;

pub trait InteractionModel {
    /// Number of contact rounds for a day.
    fn interactions(&self, population_size: usize, activity_level: f64, space: usize) -> usize;
}

impl<F> InteractionModel for F
where
    F: Fn(usize, f64, usize) -> usize,
{
    fn interactions(&self, population_size: usize, activity_level: f64, space: usize) -> usize {
        self(population_size, activity_level, space)
    }
}

type InteractionFn = dyn Fn(usize, f64, usize) -> usize;

/// A user supplied interaction function with a name for logs and reports.
pub struct Interaction {
    name: String,
    definition: Box<InteractionFn>,
}

impl Interaction {
    pub fn new<F>(name: &str, definition: F) -> Self
    where
        F: Fn(usize, f64, usize) -> usize + 'static,
    {
        Interaction {
            name: name.to_string(),
            definition: Box::new(definition),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl InteractionModel for Interaction {
    fn interactions(&self, population_size: usize, activity_level: f64, space: usize) -> usize {
        (self.definition)(population_size, activity_level, space)
    }
}

impl Debug for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Interaction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<Interaction: {}>", self.name)
    }
}

/// The same number of rounds every day.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConstantInteractions(pub usize);

impl InteractionModel for ConstantInteractions {
    fn interactions(&self, _population_size: usize, _activity_level: f64, _space: usize) -> usize {
        self.0
    }
}

/// Interaction models that can be described in a parameter file.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionConfig {
    /// `rounds` every day.
    Constant { rounds: usize },
    /// `floor(max_rounds * activity_level)` rounds.
    ActivityScaled { max_rounds: usize },
}

impl InteractionConfig {
    /// # Errors
    ///
    /// Returns [`EpisimError::ConfigError`] if `max_rounds` is zero for an activity scaled model.
    pub fn validate(&self) -> Result<(), EpisimError> {
        match self {
            InteractionConfig::Constant { .. } => Ok(()),
            InteractionConfig::ActivityScaled { max_rounds: 0 } => {
                Err("activity scaled interaction needs max_rounds > 0".into())
            }
            InteractionConfig::ActivityScaled { .. } => Ok(()),
        }
    }

    #[must_use]
    pub fn build(self) -> Box<dyn InteractionModel> {
        match self {
            InteractionConfig::Constant { rounds } => Box::new(ConstantInteractions(rounds)),
            InteractionConfig::ActivityScaled { max_rounds } => {
                Box::new(Interaction::new("activity_scaled", move |_, activity, _| {
                    activity_scaled_rounds(max_rounds, activity)
                }))
            }
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        InteractionConfig::ActivityScaled { max_rounds: 10 }
    }
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn activity_scaled_rounds(max_rounds: usize, activity_level: f64) -> usize {
    if !activity_level.is_finite() || activity_level <= 0.0 {
        return 0;
    }
    (max_rounds as f64 * activity_level).floor() as usize
}

/// Evaluates `model` at every `(size, activity)` pair of the grid, for a fixed `space`. Rows
/// follow `sizes`, columns follow `activities`.
pub fn sample_surface<M: InteractionModel + ?Sized>(
    model: &M,
    sizes: &[usize],
    activities: &[f64],
    space: usize,
) -> Vec<Vec<usize>> {
    sizes
        .iter()
        .map(|&size| {
            activities
                .iter()
                .map(|&activity| model.interactions(size, activity, space))
                .collect()
        })
        .collect()
}
