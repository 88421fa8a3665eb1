use log::trace;

use crate::health_state::HealthState;
use crate::population::Population;

/// Advances every infection by one day. Infections whose day counter now exceeds `life_time`
/// end in immunity; the diagnosis flag is kept. Returns the number of new immunizations.
pub fn progress_infections(population: &mut Population, life_time: u32) -> usize {
    let mut immunized = 0;
    for individual in population.individuals_mut() {
        let Some(days) = individual.state_mut().increment_days() else {
            continue;
        };
        if days > life_time {
            individual.set_state(HealthState::immunized());
            immunized += 1;
        }
    }
    trace!("{} individuals immunized", immunized);
    immunized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health_state::{Kind, Severity};
    use crate::population::Individual;

    fn infected_for(days: u32, severity: Severity) -> Individual {
        let mut individual = Individual::new(HealthState::infected(severity));
        for _ in 0..days {
            individual.state_mut().increment_days();
        }
        individual
    }

    #[test]
    fn immunized_once_life_time_is_exceeded() {
        let life_time = 15;
        let individuals = vec![
            infected_for(life_time, Severity::Light),
            infected_for(life_time - 1, Severity::Light),
        ];
        let mut population = Population::from_individuals(individuals, 10);

        assert_eq!(progress_infections(&mut population, life_time), 1);
        assert_eq!(population.get(0).unwrap().state().kind(), Kind::Immunized);
        let still_infected = population.get(1).unwrap().state();
        assert_eq!(still_infected.kind(), Kind::SymptomaticLight);
        assert_eq!(still_infected.days_with_infection(), Some(life_time));
    }

    #[test]
    fn diagnosis_survives_immunization() {
        let mut individual = infected_for(3, Severity::Mild);
        individual.diagnose();
        let mut population = Population::from_individuals(vec![individual], 10);

        progress_infections(&mut population, 3);
        let individual = population.get(0).unwrap();
        assert!(individual.state().is_immunized());
        assert!(individual.is_diagnosed());
        assert_eq!(individual.state().interaction_capacity(), 1.0);
    }

    #[test]
    fn healthy_and_immunized_untouched() {
        let individuals = vec![
            Individual::new(HealthState::healthy()),
            Individual::new(HealthState::immunized()),
        ];
        let mut population = Population::from_individuals(individuals.clone(), 10);
        assert_eq!(progress_infections(&mut population, 0), 0);
        assert_eq!(population.individuals(), individuals.as_slice());
    }
}
