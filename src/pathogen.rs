//! Disease course parameters and the infection outcome draw.
use std::fmt::{self, Display};

use log::trace;
use rand::Rng;
use serde_derive::{Deserialize, Serialize};

use crate::error::EpisimError;
use crate::health_state::{HealthState, Severity};
use crate::numeric::{almost_eq, is_probability, SHARE_TOLERANCE};
use crate::random::RngSampleExt;

/// How a new infection splits across severities. The four shares must sum to one.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeverityShares {
    pub light: f64,
    pub mild: f64,
    pub severe: f64,
    pub asymptomatic: f64,
}

impl SeverityShares {
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.light + self.mild + self.severe + self.asymptomatic
    }
}

impl Default for SeverityShares {
    fn default() -> Self {
        SeverityShares {
            light: 0.25,
            mild: 0.45,
            severe: 0.2,
            asymptomatic: 0.1,
        }
    }
}

/// Immutable pathogen parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Pathogen {
    life_time: u32,
    death_rate: f64,
    transmission_probability: f64,
    // Upper bounds of the light, mild and severe buckets. Anything above `cumulative[2]` is
    // asymptomatic.
    cumulative: [f64; 3],
}

impl Pathogen {
    /// Builds a pathogen.
    ///
    /// # Errors
    ///
    /// Returns [`EpisimError::InvalidShares`] if the shares do not sum to one within
    /// [`SHARE_TOLERANCE`], and [`EpisimError::ConfigError`] if a share is negative or a rate is
    /// not a probability.
    pub fn new(
        life_time: u32,
        death_rate: f64,
        shares: SeverityShares,
        transmission_probability: f64,
    ) -> Result<Self, EpisimError> {
        if !is_probability(death_rate) {
            return Err(format!("death rate must be in [0, 1], got {death_rate}").into());
        }
        if !is_probability(transmission_probability) {
            return Err(format!(
                "transmission probability must be in [0, 1], got {transmission_probability}"
            )
            .into());
        }
        let all_shares = [shares.light, shares.mild, shares.severe, shares.asymptomatic];
        if all_shares.iter().any(|share| !is_probability(*share)) {
            return Err(format!("severity shares must each be in [0, 1], got {shares:?}").into());
        }
        let sum = shares.sum();
        if !almost_eq(sum, 1.0, SHARE_TOLERANCE) {
            return Err(EpisimError::InvalidShares { sum });
        }

        let light = shares.light;
        let mild = light + shares.mild;
        let severe = mild + shares.severe;
        let pathogen = Pathogen {
            life_time,
            death_rate,
            transmission_probability,
            cumulative: [light, mild, severe],
        };
        trace!("created pathogen {}", pathogen);
        Ok(pathogen)
    }

    #[must_use]
    pub fn life_time(&self) -> u32 {
        self.life_time
    }

    #[must_use]
    pub fn death_rate(&self) -> f64 {
        self.death_rate
    }

    #[must_use]
    pub fn transmission_probability(&self) -> f64 {
        self.transmission_probability
    }

    /// Recovers the four shares from the cumulative distribution.
    #[must_use]
    pub fn shares(&self) -> SeverityShares {
        let [light, mild, severe] = self.cumulative;
        SeverityShares {
            light,
            mild: mild - light,
            severe: severe - mild,
            asymptomatic: 1.0 - severe,
        }
    }

    /// Resolves one exposure. Returns `Healthy` when transmission fails, otherwise a fresh
    /// infected state whose severity is drawn from the shares. Consumes one draw when
    /// transmission fails and two when it succeeds.
    pub fn infect<R: Rng + ?Sized>(&self, rng: &mut R) -> HealthState {
        if rng.sample_unit() > self.transmission_probability {
            return HealthState::healthy();
        }
        let v = rng.sample_unit();
        let severity = if v <= self.cumulative[0] {
            Severity::Light
        } else if v <= self.cumulative[1] {
            Severity::Mild
        } else if v <= self.cumulative[2] {
            Severity::Severe
        } else {
            Severity::Asymptomatic
        };
        HealthState::infected(severity)
    }
}

impl Display for Pathogen {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let shares = self.shares();
        write!(
            f,
            "<Pathogen: life time: {}; death rate: {:.2}; transmission probability: {:.2}; \
             light: {:.2}; mild: {:.2}; severe: {:.2}; asymptomatic: {:.2}>",
            self.life_time,
            self.death_rate,
            self.transmission_probability,
            shares.light,
            shares.mild,
            shares.severe,
            shares.asymptomatic
        )
    }
}
