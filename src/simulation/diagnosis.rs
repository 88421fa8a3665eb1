use log::trace;

use crate::population::Population;

/// Diagnoses undiagnosed symptomatic individuals, in population order, up to a budget of
/// `floor(diagnosis_rate * infected_without_diagnosis)`. Asymptomatic, healthy and immunized
/// individuals are never diagnosed. Returns the number of new diagnoses.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn diagnose_population(population: &mut Population, diagnosis_rate: f64) -> usize {
    let mut budget =
        (diagnosis_rate * population.infected_without_diagnosis() as f64).floor() as usize;
    trace!("diagnosis budget {}", budget);

    let mut diagnosed = 0;
    for individual in population.individuals_mut() {
        if budget == 0 {
            break;
        }
        if individual.is_diagnosed() || !individual.state().kind().is_symptomatic() {
            continue;
        }
        individual.diagnose();
        budget -= 1;
        diagnosed += 1;
    }
    diagnosed
}
