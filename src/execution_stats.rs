//! Wall clock statistics for a simulation run.
// Loss of precision is fine for timing ratios.
#![allow(clippy::cast_precision_loss)]

use std::time::{Duration, Instant};

use humantime::format_duration;
use log::{info, log_enabled, Level};
use serde_derive::Serialize;

/// Summary of one run. Per person and per day times are zero when there is nothing to divide by.
#[derive(Clone, Debug, Serialize)]
pub struct ExecutionStatistics {
    pub wall_time: Duration,
    /// Initial population size.
    pub population: usize,
    pub days: usize,
    pub wall_time_per_person: Duration,
    pub wall_time_per_day: Duration,
}

/// Started right before the first simulated day.
#[derive(Debug)]
pub struct ExecutionStatsCollector {
    start_time: Instant,
}

impl Default for ExecutionStatsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionStatsCollector {
    #[must_use]
    pub fn new() -> Self {
        ExecutionStatsCollector {
            start_time: Instant::now(),
        }
    }

    #[must_use]
    pub fn compute_final_statistics(&self, population: usize, days: usize) -> ExecutionStatistics {
        let wall_time = self.start_time.elapsed();
        ExecutionStatistics {
            wall_time,
            population,
            days,
            wall_time_per_person: per_unit(wall_time, population),
            wall_time_per_day: per_unit(wall_time, days),
        }
    }
}

fn per_unit(total: Duration, units: usize) -> Duration {
    if units == 0 {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(total.as_secs_f64() / units as f64)
}

/// Logs the statistics when info messages from this module are enabled, and prints them to the
/// console otherwise.
pub fn report_execution_statistics(stats: &ExecutionStatistics) {
    if log_enabled!(Level::Info) {
        log_execution_statistics(stats);
    } else {
        print_execution_statistics(stats);
    }
}

pub fn print_execution_statistics(stats: &ExecutionStatistics) {
    println!("━━━━ Execution Summary ━━━━");
    println!("{:<25}{}", "Wall time:", format_duration(stats.wall_time));
    println!("{:<25}{}", "Days:", stats.days);
    if stats.days > 0 {
        println!(
            "{:<25}{}",
            "Wall time per day:",
            format_duration(stats.wall_time_per_day)
        );
    }
    if stats.population > 0 {
        println!("{:<25}{}", "Population:", stats.population);
        println!(
            "{:<25}{}",
            "Wall time per person:",
            format_duration(stats.wall_time_per_person)
        );
    }
}

pub fn log_execution_statistics(stats: &ExecutionStatistics) {
    info!("Execution complete.");
    info!("Wall time: {}", format_duration(stats.wall_time));
    info!("Days: {}", stats.days);
    if stats.days > 0 {
        info!(
            "Wall time per day: {}",
            format_duration(stats.wall_time_per_day)
        );
    }
    if stats.population > 0 {
        info!("Population: {}", stats.population);
        info!(
            "Wall time per person: {}",
            format_duration(stats.wall_time_per_person)
        );
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn wall_time_advances() {
        let collector = ExecutionStatsCollector::new();
        thread::sleep(Duration::from_millis(20));
        let stats = collector.compute_final_statistics(10, 4);
        assert!(stats.wall_time >= Duration::from_millis(20));
        assert_eq!(stats.population, 10);
        assert_eq!(stats.days, 4);
        assert!(stats.wall_time_per_day > Duration::ZERO);
        assert!(stats.wall_time_per_person <= stats.wall_time_per_day);
    }

    #[test]
    fn zero_units_give_zero_ratios() {
        let stats = ExecutionStatsCollector::new().compute_final_statistics(0, 0);
        assert_eq!(stats.wall_time_per_person, Duration::ZERO);
        assert_eq!(stats.wall_time_per_day, Duration::ZERO);
    }

    #[test]
    fn per_unit_divides() {
        assert_eq!(per_unit(Duration::from_secs(10), 4), Duration::from_millis(2500));
    }
}
