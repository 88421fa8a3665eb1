//! Per-day time series produced by a simulation.
//!
//! The [`Report`] is append-only: the engine adds one [`DayRecord`] per simulated day, taken
//! before that day's updates, and then fills in the deaths that happened during the day. Readers
//! get whole series back (`total_infected()`, `deaths()`, ...) ready to be plotted elsewhere, or
//! write the records out as CSV.
use std::ffi::OsStr;
use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::Path;

use csv::Writer;
use log::{trace, warn};
use serde_derive::{Deserialize, Serialize};

use crate::error::EpisimError;
use crate::population::{KindCounts, Population};

/// Aggregate counts for one day.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub day: usize,
    pub total_infected: usize,
    pub healthy: usize,
    pub asymptomatic: usize,
    pub light: usize,
    pub mild: usize,
    pub severe: usize,
    pub immunized: usize,
    /// Infected individuals that have been diagnosed.
    pub diagnosed: usize,
    /// Deaths during this day.
    pub deaths: usize,
}

impl DayRecord {
    #[must_use]
    pub fn breakdown(&self) -> KindCounts {
        KindCounts {
            healthy: self.healthy,
            asymptomatic: self.asymptomatic,
            light: self.light,
            mild: self.mild,
            severe: self.severe,
            immunized: self.immunized,
        }
    }

    /// Size of the population when the record was taken.
    #[must_use]
    pub fn population_size(&self) -> usize {
        self.breakdown().total()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    records: Vec<DayRecord>,
}

impl Report {
    #[must_use]
    pub fn new() -> Self {
        Report::default()
    }

    /// Appends a snapshot of `population` for `day`. Deaths start at zero until
    /// [`Report::record_deaths`] is called for the day.
    pub fn record(&mut self, day: usize, population: &Population) {
        let counts = population.count_kinds();
        let record = DayRecord {
            day,
            total_infected: counts.infected(),
            healthy: counts.healthy,
            asymptomatic: counts.asymptomatic,
            light: counts.light,
            mild: counts.mild,
            severe: counts.severe,
            immunized: counts.immunized,
            diagnosed: population.num_diagnosed(),
            deaths: 0,
        };
        trace!("recording {:?}", record);
        self.records.push(record);
    }

    /// Stores the deaths of the most recently recorded day.
    pub fn record_deaths(&mut self, deaths: usize) {
        match self.records.last_mut() {
            Some(record) => record.deaths = deaths,
            None => warn!("attempted to record deaths before any day was recorded"),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[DayRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&DayRecord> {
        self.records.last()
    }

    fn series<T>(&self, f: impl Fn(&DayRecord) -> T) -> Vec<T> {
        self.records.iter().map(f).collect()
    }

    #[must_use]
    pub fn days(&self) -> Vec<usize> {
        self.series(|r| r.day)
    }

    #[must_use]
    pub fn total_infected(&self) -> Vec<usize> {
        self.series(|r| r.total_infected)
    }

    #[must_use]
    pub fn breakdown(&self) -> Vec<KindCounts> {
        self.series(DayRecord::breakdown)
    }

    #[must_use]
    pub fn diagnosed(&self) -> Vec<usize> {
        self.series(|r| r.diagnosed)
    }

    /// Infected individuals that have not been diagnosed, per day.
    #[must_use]
    pub fn undiagnosed(&self) -> Vec<usize> {
        self.series(|r| r.total_infected - r.diagnosed)
    }

    #[must_use]
    pub fn immunized(&self) -> Vec<usize> {
        self.series(|r| r.immunized)
    }

    #[must_use]
    pub fn deaths(&self) -> Vec<usize> {
        self.series(|r| r.deaths)
    }

    #[must_use]
    pub fn total_deaths(&self) -> usize {
        self.records.iter().map(|r| r.deaths).sum()
    }

    /// Serializes every record as a CSV row to `writer`, with a header row.
    ///
    /// # Errors
    ///
    /// Returns an `EpisimError` if serialization or the underlying writer fails.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), EpisimError> {
        let mut writer = Writer::from_writer(writer);
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the report to a CSV file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an `EpisimError` if the path is not a `.csv` file or cannot be written.
    pub fn write_csv(&self, path: &Path) -> Result<(), EpisimError> {
        let file = generate_validate_filepath(path)?;
        self.write_to(file)
    }
}

// Checks that the path is valid. Creates the file and all parent directories if
// they do not exist. Returns the file if successful.
fn generate_validate_filepath(path: &Path) -> Result<File, EpisimError> {
    match path.extension().and_then(OsStr::to_str) {
        Some("csv") => {
            if let Some(parent) = path.parent() {
                create_dir_all(parent)?;
            }
            let file = File::create(path)?;
            Ok(file)
        }
        _ => Err(EpisimError::ConfigError(
            "Report output files must be CSVs at this time".to_string(),
        )),
    }
}
