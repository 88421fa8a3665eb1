use log::{debug, trace};
use rand::Rng;
use serde_derive::{Deserialize, Serialize};

use crate::health_state::HealthState;
use crate::interaction::InteractionModel;
use crate::pathogen::Pathogen;
use crate::population::Population;
use crate::random::RngSampleExt;

/// Which side of an effective contact can be infected.
///
/// The contact step pairs a *scanning* individual (the one the round is iterating over) with a
/// randomly sampled *partner*.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureRule {
    /// Either party can infect the other: an infected scanner exposes a healthy partner, and an
    /// infected partner exposes a healthy scanner.
    #[default]
    Symmetric,
    /// Only an infected scanner exposes a healthy partner. A healthy scanner is never infected
    /// by its partner. Epidemics spread more slowly under this rule.
    Directional,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Party {
    Scanner,
    Partner,
}

/// Decides who, if anyone, is exposed by an effective contact. Only state families are
/// compared: severity does not matter, and immunized individuals are never exposed.
fn exposed_party(scanner: &HealthState, partner: &HealthState, rule: ExposureRule) -> Option<Party> {
    if scanner.is_infected() && partner.is_healthy() {
        return Some(Party::Partner);
    }
    if rule == ExposureRule::Symmetric && partner.is_infected() && scanner.is_healthy() {
        return Some(Party::Scanner);
    }
    None
}

/// Runs one day of contacts and returns the number of new infections.
///
/// The interaction model sizes the day. Every round walks the live population in order and
/// pairs each individual with a partner drawn uniformly with replacement (possibly itself).
/// The contact is effective with probability equal to the product of the two interaction
/// capacities. States are updated immediately, so someone infected early in a round can
/// infect others later in the same round.
///
/// Per pairing the draws are: partner index, contact test, then the one or two draws of
/// [`Pathogen::infect`] if someone is exposed.
pub fn generate_interactions<M, R>(
    population: &mut Population,
    pathogen: &Pathogen,
    activity_level: f64,
    interaction: &M,
    exposure_rule: ExposureRule,
    rng: &mut R,
) -> usize
where
    M: InteractionModel + ?Sized,
    R: Rng + ?Sized,
{
    let rounds = interaction.interactions(population.len(), activity_level, population.space());
    debug!(
        "{} contact rounds for {} individuals",
        rounds,
        population.len()
    );
    if population.is_empty() {
        return 0;
    }

    let individuals = population.individuals_mut();
    let len = individuals.len();
    let mut infections = 0;
    for _ in 0..rounds {
        for index in 0..len {
            let partner = rng.sample_index(len);
            let contact_probability = individuals[index].state().interaction_capacity()
                * individuals[partner].state().interaction_capacity();
            if rng.sample_unit() >= contact_probability {
                continue;
            }

            let target = match exposed_party(
                individuals[index].state(),
                individuals[partner].state(),
                exposure_rule,
            ) {
                Some(Party::Scanner) => index,
                Some(Party::Partner) => partner,
                None => continue,
            };
            let outcome = pathogen.infect(rng);
            if outcome.is_infected() {
                trace!("individual {} infected ({})", target, outcome);
                individuals[target].set_state(outcome);
                infections += 1;
            }
        }
    }
    infections
}
