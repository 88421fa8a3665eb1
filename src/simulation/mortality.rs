use log::trace;
use rand::Rng;

use crate::health_state::Kind;
use crate::population::Population;
use crate::random::RngSampleExt;

/// Each severe case dies with probability `death_rate`. One draw is made per severe individual,
/// in population order, and all removals are applied after the pass so that removing one
/// individual never causes the next one to be skipped. Returns the number of deaths.
pub fn kill<R: Rng + ?Sized>(population: &mut Population, death_rate: f64, rng: &mut R) -> usize {
    let dying: Vec<usize> = population
        .iter()
        .enumerate()
        .filter(|(_, individual)| individual.state().kind() == Kind::SymptomaticSevere)
        .filter_map(|(index, _)| (death_rate >= rng.sample_unit()).then_some(index))
        .collect();
    trace!("{} severe cases died", dying.len());
    population.remove_dead(&dying)
}
