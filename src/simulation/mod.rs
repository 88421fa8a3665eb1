//! The day-by-day simulation engine.
//!
//! Each simulated day runs the same fixed pipeline over the population:
//!
//! 1. the report records a snapshot of the population, before any of today's changes;
//! 2. diagnosis ([`diagnose_population`]);
//! 3. contacts and infections ([`generate_interactions`]);
//! 4. mortality ([`kill`]), whose count is added to today's record;
//! 5. progression of ongoing infections ([`progress_infections`]).
//!
//! The pipeline draws from a single random stream in a fixed order, so a run seeded the same
//! way twice produces the same report. The loop always runs for the requested number of days;
//! an empty population simply makes every step a no-op.
mod contact;
mod diagnosis;
mod mortality;
mod progression;

pub use contact::{generate_interactions, ExposureRule};
pub use diagnosis::diagnose_population;
pub use mortality::kill;
pub use progression::progress_infections;

use log::{debug, info};
use rand::Rng;
use serde_derive::{Deserialize, Serialize};

use crate::error::EpisimError;
use crate::interaction::InteractionModel;
use crate::numeric::is_probability;
use crate::pathogen::Pathogen;
use crate::population::Population;
use crate::progress::DayProgress;
use crate::report::Report;

/// Day-level settings shared by every day of a run.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Passed to the interaction model every day.
    pub activity_level: f64,
    /// Fraction of undiagnosed infections that can be diagnosed each day.
    pub diagnosis_rate: f64,
    #[serde(default)]
    pub exposure_rule: ExposureRule,
}

impl SimulationSettings {
    #[must_use]
    pub fn new(activity_level: f64, diagnosis_rate: f64) -> Self {
        SimulationSettings {
            activity_level,
            diagnosis_rate,
            exposure_rule: ExposureRule::default(),
        }
    }

    #[must_use]
    pub fn with_exposure_rule(mut self, exposure_rule: ExposureRule) -> Self {
        self.exposure_rule = exposure_rule;
        self
    }

    /// # Errors
    ///
    /// Returns [`EpisimError::ConfigError`] if the activity level is negative or not finite, or
    /// the diagnosis rate is outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), EpisimError> {
        if !self.activity_level.is_finite() || self.activity_level < 0.0 {
            return Err(format!(
                "activity level must be a non-negative number, got {}",
                self.activity_level
            )
            .into());
        }
        if !is_probability(self.diagnosis_rate) {
            return Err(format!(
                "diagnosis rate must be in [0, 1], got {}",
                self.diagnosis_rate
            )
            .into());
        }
        Ok(())
    }
}

/// What happened during one simulated day.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DayOutcome {
    pub day: usize,
    pub diagnosed: usize,
    pub infections: usize,
    pub deaths: usize,
    pub immunized: usize,
}

/// Drives the daily pipeline over a borrowed population.
pub struct Simulation<'a, M: InteractionModel + ?Sized> {
    population: &'a mut Population,
    pathogen: &'a Pathogen,
    interaction: &'a M,
    settings: SimulationSettings,
    report: Report,
    day: usize,
    show_progress: bool,
}

impl<'a, M: InteractionModel + ?Sized> Simulation<'a, M> {
    /// # Errors
    ///
    /// Returns [`EpisimError::ConfigError`] if `settings` are invalid. Nothing has been
    /// simulated when this fails.
    pub fn new(
        population: &'a mut Population,
        pathogen: &'a Pathogen,
        interaction: &'a M,
        settings: SimulationSettings,
    ) -> Result<Self, EpisimError> {
        settings.validate()?;
        Ok(Simulation {
            population,
            pathogen,
            interaction,
            settings,
            report: Report::new(),
            day: 0,
            show_progress: false,
        })
    }

    /// Shows a progress bar over days while [`Simulation::run`] executes.
    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// The next day to be simulated.
    #[must_use]
    pub fn day(&self) -> usize {
        self.day
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &*self.population
    }

    #[must_use]
    pub fn report(&self) -> &Report {
        &self.report
    }

    #[must_use]
    pub fn into_report(self) -> Report {
        self.report
    }

    /// Simulates one day.
    pub fn step_day<R: Rng + ?Sized>(&mut self, rng: &mut R) -> DayOutcome {
        let day = self.day;
        self.report.record(day, self.population);

        let diagnosed = diagnose_population(self.population, self.settings.diagnosis_rate);
        let infections = generate_interactions(
            self.population,
            self.pathogen,
            self.settings.activity_level,
            self.interaction,
            self.settings.exposure_rule,
            rng,
        );
        let deaths = kill(self.population, self.pathogen.death_rate(), rng);
        self.report.record_deaths(deaths);
        let immunized = progress_infections(self.population, self.pathogen.life_time());

        self.day += 1;
        let outcome = DayOutcome {
            day,
            diagnosed,
            infections,
            deaths,
            immunized,
        };
        debug!("{:?}", outcome);
        outcome
    }

    /// Simulates `iterations` more days.
    pub fn run<R: Rng + ?Sized>(&mut self, iterations: usize, rng: &mut R) {
        info!(
            "simulating {} days for a population of {}",
            iterations,
            self.population.len()
        );
        let progress = self.show_progress.then(|| DayProgress::new(iterations));
        for _ in 0..iterations {
            self.step_day(rng);
            if let Some(progress) = &progress {
                progress.increment();
            }
        }
        if let Some(progress) = progress {
            progress.finish();
        }
        info!(
            "simulation finished after {} days: {} alive, {} deaths",
            self.day,
            self.population.len(),
            self.population.deaths()
        );
    }
}

/// Runs `iterations` days with the given settings and returns the report.
///
/// # Errors
///
/// Returns [`EpisimError::ConfigError`] if `settings` are invalid, before any day is simulated.
pub fn simulate_with<M, R>(
    population: &mut Population,
    pathogen: &Pathogen,
    iterations: usize,
    settings: SimulationSettings,
    interaction: &M,
    rng: &mut R,
) -> Result<Report, EpisimError>
where
    M: InteractionModel + ?Sized,
    R: Rng + ?Sized,
{
    let mut simulation = Simulation::new(population, pathogen, interaction, settings)?;
    simulation.run(iterations, rng);
    Ok(simulation.into_report())
}

/// Runs `iterations` days with the default exposure rule and returns the report.
///
/// # Errors
///
/// Returns [`EpisimError::ConfigError`] if `activity_level` is negative or `diagnosis_rate` is
/// not a probability, before any day is simulated.
pub fn simulate<M, R>(
    population: &mut Population,
    pathogen: &Pathogen,
    iterations: usize,
    activity_level: f64,
    diagnosis_rate: f64,
    interaction: &M,
    rng: &mut R,
) -> Result<Report, EpisimError>
where
    M: InteractionModel + ?Sized,
    R: Rng + ?Sized,
{
    simulate_with(
        population,
        pathogen,
        iterations,
        SimulationSettings::new(activity_level, diagnosis_rate),
        interaction,
        rng,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health_state::{HealthState, Severity};
    use crate::interaction::ConstantInteractions;
    use crate::pathogen::SeverityShares;
    use crate::population::Individual;
    use crate::random::seeded_rng;

    fn pathogen(life_time: u32, death_rate: f64) -> Pathogen {
        Pathogen::new(life_time, death_rate, SeverityShares::default(), 1.0).unwrap()
    }

    #[test]
    fn invalid_settings_rejected_before_any_day() {
        let mut rng = seeded_rng(42);
        let mut population = Population::new(5, 100, 50, &mut rng).unwrap();
        let before = population.clone();

        let result = simulate(
            &mut population,
            &pathogen(15, 0.01),
            10,
            0.8,
            1.5,
            &ConstantInteractions(1),
            &mut rng,
        );
        assert!(matches!(result, Err(EpisimError::ConfigError(_))));
        assert_eq!(population.individuals(), before.individuals());

        let result = simulate(
            &mut population,
            &pathogen(15, 0.01),
            10,
            f64::NAN,
            0.5,
            &ConstantInteractions(1),
            &mut rng,
        );
        assert!(matches!(result, Err(EpisimError::ConfigError(_))));
    }

    #[test]
    fn one_record_per_day() {
        let mut rng = seeded_rng(42);
        let mut population = Population::new(5, 100, 50, &mut rng).unwrap();
        let report = simulate(
            &mut population,
            &pathogen(15, 0.01),
            12,
            0.8,
            0.5,
            &ConstantInteractions(1),
            &mut rng,
        )
        .unwrap();
        assert_eq!(report.len(), 12);
        assert_eq!(report.days(), (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn snapshot_is_taken_before_the_day() {
        // Everyone is severe and dies on day 0, yet day 0 still records them.
        let individuals = (0..4)
            .map(|_| Individual::new(HealthState::infected(Severity::Severe)))
            .collect();
        let mut population = Population::from_individuals(individuals, 10);
        let pathogen = pathogen(15, 1.0);
        let interaction = ConstantInteractions(0);
        let mut simulation = Simulation::new(
            &mut population,
            &pathogen,
            &interaction,
            SimulationSettings::new(0.0, 0.0),
        )
        .unwrap();
        let mut rng = seeded_rng(42);

        let outcome = simulation.step_day(&mut rng);
        assert_eq!(outcome.deaths, 4);
        let record = simulation.report().last().unwrap();
        assert_eq!(record.severe, 4);
        assert_eq!(record.deaths, 4);

        // The following days run on an empty population without error.
        simulation.run(3, &mut rng);
        assert_eq!(simulation.day(), 4);
        assert_eq!(simulation.report().total_deaths(), 4);
        assert_eq!(simulation.report().last().unwrap().population_size(), 0);
        assert!(simulation.population().is_empty());
    }

    #[test]
    fn diagnosis_precedes_contacts() {
        let individuals = vec![
            Individual::new(HealthState::infected(Severity::Light)),
            Individual::new(HealthState::healthy()),
        ];
        let mut population = Population::from_individuals(individuals, 10);
        let pathogen = pathogen(15, 0.0);
        let interaction = ConstantInteractions(0);
        let mut simulation = Simulation::new(
            &mut population,
            &pathogen,
            &interaction,
            SimulationSettings::new(0.0, 1.0),
        )
        .unwrap();
        let mut rng = seeded_rng(42);

        let outcome = simulation.step_day(&mut rng);
        assert_eq!(outcome.diagnosed, 1);
        // The snapshot was taken before diagnosis.
        assert_eq!(simulation.report().last().unwrap().diagnosed, 0);
        simulation.step_day(&mut rng);
        assert_eq!(simulation.report().last().unwrap().diagnosed, 1);
    }
}
