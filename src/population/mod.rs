//! The closed population a simulation runs on.
//!
//! A [`Population`] is an ordered sequence of [`Individual`]s. Positions matter: contact
//! sampling picks partners by index and removals shift everyone behind the removed individual.
//! Individuals are only ever removed (by death) after construction, so
//! `len() + deaths() == initial_size()` always holds.
mod individual;

pub use individual::Individual;

use log::{debug, trace};
use rand::Rng;

use crate::error::EpisimError;
use crate::health_state::{HealthState, Kind, Severity};
use crate::random::RngSampleExt;

/// Number of individuals of each kind at one point in time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KindCounts {
    pub healthy: usize,
    pub asymptomatic: usize,
    pub light: usize,
    pub mild: usize,
    pub severe: usize,
    pub immunized: usize,
}

impl KindCounts {
    #[must_use]
    pub fn get(&self, kind: Kind) -> usize {
        match kind {
            Kind::Healthy => self.healthy,
            Kind::Asymptomatic => self.asymptomatic,
            Kind::SymptomaticLight => self.light,
            Kind::SymptomaticMild => self.mild,
            Kind::SymptomaticSevere => self.severe,
            Kind::Immunized => self.immunized,
        }
    }

    fn increment(&mut self, kind: Kind) {
        let count = match kind {
            Kind::Healthy => &mut self.healthy,
            Kind::Asymptomatic => &mut self.asymptomatic,
            Kind::SymptomaticLight => &mut self.light,
            Kind::SymptomaticMild => &mut self.mild,
            Kind::SymptomaticSevere => &mut self.severe,
            Kind::Immunized => &mut self.immunized,
        };
        *count += 1;
    }

    /// Sum over all six kinds.
    #[must_use]
    pub fn total(&self) -> usize {
        self.healthy + self.asymptomatic + self.light + self.mild + self.severe + self.immunized
    }

    /// Sum over the infected family.
    #[must_use]
    pub fn infected(&self) -> usize {
        self.asymptomatic + self.light + self.mild + self.severe
    }
}

#[derive(Clone, Debug)]
pub struct Population {
    individuals: Vec<Individual>,
    space: usize,
    deaths: usize,
    initial_size: usize,
}

impl Population {
    /// Creates `population_size` healthy individuals, turns `initial_cases` of them into light
    /// symptomatic cases and shuffles the whole sequence once so the seeds are spread out.
    ///
    /// # Errors
    ///
    /// Returns [`EpisimError::ConfigError`] if there are more initial cases than individuals.
    pub fn new<R: Rng + ?Sized>(
        initial_cases: usize,
        population_size: usize,
        space: usize,
        rng: &mut R,
    ) -> Result<Self, EpisimError> {
        if initial_cases > population_size {
            return Err(format!(
                "initial cases ({initial_cases}) exceed the population size ({population_size})"
            )
            .into());
        }
        trace!(
            "initializing population of {} with {} initial cases",
            population_size,
            initial_cases
        );
        let mut individuals = vec![Individual::default(); population_size];
        for individual in individuals.iter_mut().take(initial_cases) {
            individual.set_state(HealthState::infected(Severity::Light));
        }
        rng.shuffle_slice(&mut individuals);

        Ok(Population {
            individuals,
            space,
            deaths: 0,
            initial_size: population_size,
        })
    }

    /// Builds a population from explicit individuals, in the given order, without shuffling.
    #[must_use]
    pub fn from_individuals(individuals: Vec<Individual>, space: usize) -> Self {
        let initial_size = individuals.len();
        Population {
            individuals,
            space,
            deaths: 0,
            initial_size,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    #[must_use]
    pub fn space(&self) -> usize {
        self.space
    }

    /// Cumulative number of individuals removed by death.
    #[must_use]
    pub fn deaths(&self) -> usize {
        self.deaths
    }

    #[must_use]
    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub(crate) fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter()
    }

    /// Number of individuals in the infected family, whatever their severity.
    #[must_use]
    pub fn num_infected(&self) -> usize {
        self.iter().filter(|i| i.state().is_infected()).count()
    }

    #[must_use]
    pub fn num_immunized(&self) -> usize {
        self.iter().filter(|i| i.state().is_immunized()).count()
    }

    /// Infected individuals (asymptomatic included) that have not been diagnosed yet.
    #[must_use]
    pub fn infected_without_diagnosis(&self) -> usize {
        self.iter()
            .filter(|i| i.state().is_infected() && !i.is_diagnosed())
            .count()
    }

    /// Infected individuals that have been diagnosed. Diagnosed individuals that have since
    /// recovered are not counted.
    #[must_use]
    pub fn num_diagnosed(&self) -> usize {
        self.iter()
            .filter(|i| i.state().is_infected() && i.is_diagnosed())
            .count()
    }

    #[must_use]
    pub fn count_kinds(&self) -> KindCounts {
        let mut counts = KindCounts::default();
        for individual in self.iter() {
            counts.increment(individual.state().kind());
        }
        counts
    }

    /// Removes the individuals at `indices` and counts them as deaths. Indices refer to positions
    /// before any removal; they are applied from the back so earlier positions stay valid.
    /// Duplicate and out-of-range indices are ignored. Returns the number removed.
    pub fn remove_dead(&mut self, indices: &[usize]) -> usize {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut removed = 0;
        for &index in sorted.iter().rev() {
            if index < self.individuals.len() {
                self.individuals.remove(index);
                removed += 1;
            }
        }
        self.deaths += removed;
        if removed > 0 {
            debug!(
                "removed {} individuals, {} deaths so far",
                removed, self.deaths
            );
        }
        removed
    }
}
