//! The disease status of an individual.
//!
//! A [`HealthState`] is one of six kinds. Four of them (asymptomatic and the three symptomatic
//! kinds) belong to the infected family and count the days since infection. The simulation uses
//! two comparisons:
//!
//! * [`same_family`] asks "are both infected?" (or both healthy, or both immunized). It decides
//!   whether propagation and progression logic applies.
//! * [`same_kind`] compares the exact kind. It drives the per-kind counts in the report and
//!   diagnosis eligibility, since only symptomatic kinds can be diagnosed.
use std::fmt::{self, Display};

use serde_derive::{Deserialize, Serialize};

/// Interaction capacity of a diagnosed individual.
pub const DIAGNOSED_CAPACITY: f64 = 0.01;

/// Coarse class of a health state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    Healthy,
    Infected,
    Immunized,
}

/// Exact variant of a health state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kind {
    Healthy,
    Asymptomatic,
    SymptomaticLight,
    SymptomaticMild,
    SymptomaticSevere,
    Immunized,
}

impl Kind {
    /// All kinds in report column order.
    pub const ALL: [Kind; 6] = [
        Kind::Healthy,
        Kind::Asymptomatic,
        Kind::SymptomaticLight,
        Kind::SymptomaticMild,
        Kind::SymptomaticSevere,
        Kind::Immunized,
    ];

    #[must_use]
    pub fn family(self) -> Family {
        match self {
            Kind::Healthy => Family::Healthy,
            Kind::Asymptomatic
            | Kind::SymptomaticLight
            | Kind::SymptomaticMild
            | Kind::SymptomaticSevere => Family::Infected,
            Kind::Immunized => Family::Immunized,
        }
    }

    /// Capacity a freshly created state of this kind starts with.
    #[must_use]
    pub fn default_capacity(self) -> f64 {
        match self {
            Kind::Healthy | Kind::Asymptomatic | Kind::Immunized => 1.0,
            Kind::SymptomaticLight => 0.7,
            Kind::SymptomaticMild => 0.3,
            Kind::SymptomaticSevere => 0.1,
        }
    }

    /// Only the symptomatic kinds can be diagnosed.
    #[must_use]
    pub fn is_symptomatic(self) -> bool {
        matches!(
            self,
            Kind::SymptomaticLight | Kind::SymptomaticMild | Kind::SymptomaticSevere
        )
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Kind::Healthy => "Healthy",
            Kind::Asymptomatic => "Asymptomatic",
            Kind::SymptomaticLight => "Symptomatic Light",
            Kind::SymptomaticMild => "Symptomatic Mild",
            Kind::SymptomaticSevere => "Symptomatic Severe",
            Kind::Immunized => "Immunized",
        };
        f.write_str(name)
    }
}

/// The severity of an ongoing infection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Asymptomatic,
    Light,
    Mild,
    Severe,
}

impl Severity {
    #[must_use]
    pub fn kind(self) -> Kind {
        match self {
            Severity::Asymptomatic => Kind::Asymptomatic,
            Severity::Light => Kind::SymptomaticLight,
            Severity::Mild => Kind::SymptomaticMild,
            Severity::Severe => Kind::SymptomaticSevere,
        }
    }
}

/// An individual's disease status. Each variant carries only the fields it needs.
#[derive(Clone, Debug, PartialEq)]
pub enum HealthState {
    Healthy {
        interaction_capacity: f64,
    },
    Infected {
        severity: Severity,
        interaction_capacity: f64,
        days_with_infection: u32,
    },
    Immunized {
        interaction_capacity: f64,
    },
}

impl HealthState {
    #[must_use]
    pub fn healthy() -> Self {
        HealthState::Healthy {
            interaction_capacity: Kind::Healthy.default_capacity(),
        }
    }

    /// A fresh infection of the given severity, zero days in.
    #[must_use]
    pub fn infected(severity: Severity) -> Self {
        HealthState::Infected {
            severity,
            interaction_capacity: severity.kind().default_capacity(),
            days_with_infection: 0,
        }
    }

    #[must_use]
    pub fn immunized() -> Self {
        HealthState::Immunized {
            interaction_capacity: Kind::Immunized.default_capacity(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            HealthState::Healthy { .. } => Kind::Healthy,
            HealthState::Infected { severity, .. } => severity.kind(),
            HealthState::Immunized { .. } => Kind::Immunized,
        }
    }

    #[must_use]
    pub fn family(&self) -> Family {
        self.kind().family()
    }

    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.family() == Family::Healthy
    }

    #[must_use]
    pub fn is_infected(&self) -> bool {
        self.family() == Family::Infected
    }

    #[must_use]
    pub fn is_immunized(&self) -> bool {
        self.family() == Family::Immunized
    }

    #[must_use]
    pub fn interaction_capacity(&self) -> f64 {
        match self {
            HealthState::Healthy {
                interaction_capacity,
            }
            | HealthState::Infected {
                interaction_capacity,
                ..
            }
            | HealthState::Immunized {
                interaction_capacity,
            } => *interaction_capacity,
        }
    }

    /// Overwrites the capacity in place. Used by diagnosis, which isolates an individual without
    /// changing its kind.
    pub fn set_interaction_capacity(&mut self, capacity: f64) {
        match self {
            HealthState::Healthy {
                interaction_capacity,
            }
            | HealthState::Infected {
                interaction_capacity,
                ..
            }
            | HealthState::Immunized {
                interaction_capacity,
            } => *interaction_capacity = capacity,
        }
    }

    /// Days since infection, `None` outside the infected family.
    #[must_use]
    pub fn days_with_infection(&self) -> Option<u32> {
        match self {
            HealthState::Infected {
                days_with_infection,
                ..
            } => Some(*days_with_infection),
            _ => None,
        }
    }

    /// Advances the infection counter by one day and returns the new value. Does nothing for
    /// states outside the infected family.
    pub fn increment_days(&mut self) -> Option<u32> {
        match self {
            HealthState::Infected {
                days_with_infection,
                ..
            } => {
                *days_with_infection += 1;
                Some(*days_with_infection)
            }
            _ => None,
        }
    }
}

impl Default for HealthState {
    fn default() -> Self {
        HealthState::healthy()
    }
}

impl Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&self.kind(), f)
    }
}

/// True if both states are healthy, both infected (of any severity) or both immunized.
#[must_use]
pub fn same_family(a: &HealthState, b: &HealthState) -> bool {
    a.family() == b.family()
}

/// True if both states are of the exact same kind.
#[must_use]
pub fn same_kind(a: &HealthState, b: &HealthState) -> bool {
    a.kind() == b.kind()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_ignores_severity() {
        let light = HealthState::infected(Severity::Light);
        let asymptomatic = HealthState::infected(Severity::Asymptomatic);
        assert!(same_family(&light, &asymptomatic));
        assert!(!same_kind(&light, &asymptomatic));
        assert!(!same_family(&light, &HealthState::healthy()));
        assert!(!same_family(&HealthState::healthy(), &HealthState::immunized()));
    }

    #[test]
    fn same_kind_ignores_mutable_fields() {
        let mut diagnosed = HealthState::infected(Severity::Mild);
        diagnosed.set_interaction_capacity(DIAGNOSED_CAPACITY);
        diagnosed.increment_days();
        assert!(same_kind(&diagnosed, &HealthState::infected(Severity::Mild)));
        assert_ne!(diagnosed, HealthState::infected(Severity::Mild));
    }

    #[test]
    fn default_capacities() {
        assert_eq!(HealthState::healthy().interaction_capacity(), 1.0);
        assert_eq!(HealthState::immunized().interaction_capacity(), 1.0);
        assert_eq!(
            HealthState::infected(Severity::Asymptomatic).interaction_capacity(),
            1.0
        );
        assert_eq!(
            HealthState::infected(Severity::Light).interaction_capacity(),
            0.7
        );
        assert_eq!(
            HealthState::infected(Severity::Mild).interaction_capacity(),
            0.3
        );
        assert_eq!(
            HealthState::infected(Severity::Severe).interaction_capacity(),
            0.1
        );
    }

    #[test]
    fn days_only_for_infected() {
        let mut healthy = HealthState::healthy();
        assert_eq!(healthy.days_with_infection(), None);
        assert_eq!(healthy.increment_days(), None);

        let mut severe = HealthState::infected(Severity::Severe);
        assert_eq!(severe.days_with_infection(), Some(0));
        assert_eq!(severe.increment_days(), Some(1));
        assert_eq!(severe.increment_days(), Some(2));
    }

    #[test]
    fn only_symptomatic_kinds_are_diagnosable() {
        let diagnosable: Vec<Kind> = Kind::ALL
            .into_iter()
            .filter(|kind| kind.is_symptomatic())
            .collect();
        assert_eq!(
            diagnosable,
            vec![
                Kind::SymptomaticLight,
                Kind::SymptomaticMild,
                Kind::SymptomaticSevere
            ]
        );
    }

    #[test]
    fn display_names() {
        assert_eq!(
            HealthState::infected(Severity::Light).to_string(),
            "Symptomatic Light"
        );
        assert_eq!(HealthState::immunized().to_string(), "Immunized");
    }
}
