//! A discrete-time stochastic simulator of an epidemic in a closed population
//!
//! Episim models a population of individuals, each healthy, infected at one of four
//! severities, or immunized. Time advances in whole days. Every day the simulation
//! * records a snapshot of the population in the [`Report`],
//! * diagnoses part of the symptomatic cases, who then isolate,
//! * pairs individuals at random in contact rounds, spreading the [`Pathogen`],
//! * removes severe cases that die,
//! * advances ongoing infections and immunizes those that have run their course.
//!
//! Runs are reproducible: all randomness is drawn from one seeded stream.
//!
//! ```rust
//! use episim::{random::seeded_rng, simulate, ConstantInteractions, Pathogen, Population,
//!     SeverityShares};
//!
//! let mut rng = seeded_rng(42);
//! let pathogen = Pathogen::new(15, 0.01, SeverityShares::default(), 1.0).unwrap();
//! let mut population = Population::new(5, 100, 50, &mut rng).unwrap();
//! let report = simulate(&mut population, &pathogen, 20, 0.8, 0.5, &ConstantInteractions(2),
//!     &mut rng).unwrap();
//! assert_eq!(report.len(), 20);
//! ```
pub mod error;
pub mod execution_stats;
pub mod health_state;
pub mod interaction;
pub mod log;
pub mod numeric;
pub mod parameters;
pub mod pathogen;
pub mod population;
pub mod progress;
pub mod random;
pub mod report;
pub mod runner;
pub mod simulation;

pub use error::EpisimError;
pub use health_state::{same_family, same_kind, Family, HealthState, Kind, Severity};
pub use interaction::{ConstantInteractions, Interaction, InteractionConfig, InteractionModel};
pub use crate::log::{debug, error, info, trace, warn};
pub use parameters::Parameters;
pub use pathogen::{Pathogen, SeverityShares};
pub use population::{Individual, KindCounts, Population};
pub use report::{DayRecord, Report};
pub use simulation::{simulate, simulate_with, ExposureRule, Simulation, SimulationSettings};

// Re-exported so models can seed and pass compatible generators.
pub use rand;
