//! Run parameters, loadable from a JSON file.
//!
//! Every field has a default, so a file only needs the values it changes:
//!
//! ```json
//! {
//!     "population_size": 2000,
//!     "shares": { "light": 0.3, "mild": 0.4, "severe": 0.2, "asymptomatic": 0.1 },
//!     "interaction": { "type": "constant", "rounds": 3 }
//! }
//! ```
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;
use rand::Rng;
use serde_derive::{Deserialize, Serialize};

use crate::error::EpisimError;
use crate::interaction::{InteractionConfig, InteractionModel};
use crate::pathogen::{Pathogen, SeverityShares};
use crate::population::Population;
use crate::simulation::{ExposureRule, SimulationSettings};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Parameters {
    pub population_size: usize,
    pub initial_cases: usize,
    pub space: usize,
    /// Days an infection lasts before the individual is immunized.
    pub life_time: u32,
    /// Daily death probability of a severe case.
    pub death_rate: f64,
    pub shares: SeverityShares,
    pub transmission_probability: f64,
    /// Number of simulated days.
    pub iterations: usize,
    pub activity_level: f64,
    pub diagnosis_rate: f64,
    pub exposure_rule: ExposureRule,
    pub interaction: InteractionConfig,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            population_size: 1000,
            initial_cases: 20,
            space: 500,
            life_time: 15,
            death_rate: 0.01,
            shares: SeverityShares::default(),
            transmission_probability: 1.0,
            iterations: 30,
            activity_level: 0.8,
            diagnosis_rate: 1.0,
            exposure_rule: ExposureRule::default(),
            interaction: InteractionConfig::default(),
        }
    }
}

impl Parameters {
    /// Reads and validates parameters from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`EpisimError::IoError`] if the file cannot be opened,
    /// [`EpisimError::JsonError`] if it is not a valid parameter document, and any error of
    /// [`Parameters::validate`].
    pub fn from_file(path: &Path) -> Result<Self, EpisimError> {
        info!("loading parameters from {}", path.display());
        let reader = BufReader::new(File::open(path)?);
        let parameters: Parameters = serde_json::from_reader(reader)?;
        parameters.validate()?;
        Ok(parameters)
    }

    /// Checks everything that can be checked before building the run inputs.
    ///
    /// # Errors
    ///
    /// Returns [`EpisimError::ConfigError`] or [`EpisimError::InvalidShares`] for the first
    /// invalid value found.
    pub fn validate(&self) -> Result<(), EpisimError> {
        if self.initial_cases > self.population_size {
            return Err(format!(
                "initial cases ({}) exceed the population size ({})",
                self.initial_cases, self.population_size
            )
            .into());
        }
        self.build_pathogen()?;
        self.settings().validate()?;
        self.interaction.validate()
    }

    /// # Errors
    ///
    /// See [`Pathogen::new`].
    pub fn build_pathogen(&self) -> Result<Pathogen, EpisimError> {
        Pathogen::new(
            self.life_time,
            self.death_rate,
            self.shares,
            self.transmission_probability,
        )
    }

    /// # Errors
    ///
    /// See [`Population::new`].
    pub fn build_population<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Population, EpisimError> {
        Population::new(self.initial_cases, self.population_size, self.space, rng)
    }

    #[must_use]
    pub fn build_interaction(&self) -> Box<dyn InteractionModel> {
        self.interaction.build()
    }

    #[must_use]
    pub fn settings(&self) -> SimulationSettings {
        SimulationSettings::new(self.activity_level, self.diagnosis_rate)
            .with_exposure_rule(self.exposure_rule)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::random::seeded_rng;

    fn write_parameters(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_are_valid() {
        let parameters = Parameters::default();
        parameters.validate().unwrap();
        let pathogen = parameters.build_pathogen().unwrap();
        assert_eq!(pathogen.life_time(), 15);

        let mut rng = seeded_rng(0);
        let population = parameters.build_population(&mut rng).unwrap();
        assert_eq!(population.len(), 1000);
        assert_eq!(population.num_infected(), 20);
        assert_eq!(parameters.build_interaction().interactions(1000, 0.8, 500), 8);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_parameters(
            r#"{
                "population_size": 50,
                "initial_cases": 2,
                "exposure_rule": "directional",
                "interaction": { "type": "constant", "rounds": 3 }
            }"#,
        );
        let parameters = Parameters::from_file(file.path()).unwrap();
        assert_eq!(parameters.population_size, 50);
        assert_eq!(parameters.initial_cases, 2);
        assert_eq!(parameters.exposure_rule, ExposureRule::Directional);
        assert_eq!(parameters.interaction, InteractionConfig::Constant { rounds: 3 });
        assert_eq!(parameters.iterations, 30);
        assert_eq!(parameters.shares, SeverityShares::default());
    }

    #[test]
    fn invalid_shares_rejected() {
        let file = write_parameters(
            r#"{ "shares": { "light": 0.5, "mild": 0.5, "severe": 0.5, "asymptomatic": 0.5 } }"#,
        );
        assert!(matches!(
            Parameters::from_file(file.path()),
            Err(EpisimError::InvalidShares { .. })
        ));
    }

    #[test]
    fn unknown_fields_rejected() {
        let file = write_parameters(r#"{ "populaton_size": 10 }"#);
        assert!(matches!(
            Parameters::from_file(file.path()),
            Err(EpisimError::JsonError(_))
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            Parameters::from_file(Path::new("does/not/exist.json")),
            Err(EpisimError::IoError(_))
        ));
    }

    #[test]
    fn inconsistent_values_rejected() {
        let parameters = Parameters {
            initial_cases: 11,
            population_size: 10,
            ..Parameters::default()
        };
        assert!(matches!(
            parameters.validate(),
            Err(EpisimError::ConfigError(_))
        ));

        let parameters = Parameters {
            diagnosis_rate: 2.0,
            ..Parameters::default()
        };
        assert!(parameters.validate().is_err());

        let parameters = Parameters {
            interaction: InteractionConfig::ActivityScaled { max_rounds: 0 },
            ..Parameters::default()
        };
        assert!(parameters.validate().is_err());
    }
}
