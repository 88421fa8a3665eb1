//! Diagnostic logging for the simulator. This is not the [`Report`](crate::report::Report): logs
//! describe what the engine is doing, the report holds the epidemic's numbers.
//!
//! The five `log` macros are re-exported here and at the crate root:
//!
//! ```rust
//! use episim::info;
//!
//! info!("starting a sweep over activity levels");
//! ```
//!
//! Logging is off until a level is set:
//!
//!  - `enable_logging()` emits everything;
//!  - `disable_logging()` turns every message off;
//!  - `set_log_level(level)` emits messages with priority at least `level`.
//!
//! Filters for individual module paths take precedence over the global level:
//!
//! ```rust
//! use episim::log::{set_log_level, set_module_filter, LevelFilter};
//!
//! set_log_level(LevelFilter::Info);
//! // Per-contact messages are very chatty.
//! set_module_filter("episim::simulation", LevelFilter::Warn);
//! ```
//!
//! The runner accepts the same settings as a string, see [`parse_log_levels`].
#[cfg(feature = "logging")]
mod standard_logger;

#[cfg(all(feature = "logging", feature = "progress_bar"))]
mod progress_bar_encoder;

#[cfg(not(feature = "logging"))]
mod null_logger;

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

pub use log::{debug, error, info, trace, warn, LevelFilter};
#[cfg(feature = "logging")]
use log4rs::Handle;

use crate::error::EpisimError;

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Off;

static LOG_CONFIGURATION: LazyLock<Mutex<LogConfiguration>> = LazyLock::new(Mutex::default);

/// Global level plus per-module overrides. One instance lives in [`LOG_CONFIGURATION`]; every
/// change is pushed to the installed logger.
#[derive(Debug)]
struct LogConfiguration {
    global_level: LevelFilter,
    /// Keyed by module path, e.g. `"episim::simulation"`.
    module_levels: BTreeMap<String, LevelFilter>,

    #[cfg(feature = "logging")]
    handle: Option<Handle>,
}

impl Default for LogConfiguration {
    fn default() -> Self {
        LogConfiguration {
            global_level: DEFAULT_LOG_LEVEL,
            module_levels: BTreeMap::new(),
            #[cfg(feature = "logging")]
            handle: None,
        }
    }
}

impl LogConfiguration {
    fn set_global_level(&mut self, level: LevelFilter) {
        self.global_level = level;
        self.apply();
    }

    /// Returns whether anything changed.
    fn insert_module_level(&mut self, module: &str, level: LevelFilter) -> bool {
        self.module_levels.insert(module.to_string(), level) != Some(level)
    }

    fn set_module_levels(&mut self, filters: &[(&str, LevelFilter)]) {
        let mut changed = false;
        for &(module, level) in filters {
            changed |= self.insert_module_level(module, level);
        }
        if changed {
            self.apply();
        }
    }

    fn remove_module_level(&mut self, module: &str) {
        if self.module_levels.remove(module).is_some() {
            self.apply();
        }
    }
}

/// Emits every message. Same as `set_log_level(LevelFilter::Trace)`.
pub fn enable_logging() {
    set_log_level(LevelFilter::Trace);
}

/// Same as `set_log_level(LevelFilter::Off)`.
pub fn disable_logging() {
    set_log_level(LevelFilter::Off);
}

/// Sets the level for modules without their own filter. `LevelFilter::Off` silences them.
pub fn set_log_level(level: LevelFilter) {
    log_configuration().set_global_level(level);
}

/// The level for modules without their own filter.
#[must_use]
pub fn log_level() -> LevelFilter {
    log_configuration().global_level
}

/// Sets the level filter for one module path and its children.
pub fn set_module_filter(module_path: &str, level: LevelFilter) {
    set_module_filters(&[(module_path, level)]);
}

/// Sets several module filters, reconfiguring the logger once.
pub fn set_module_filters(filters: &[(&str, LevelFilter)]) {
    log_configuration().set_module_levels(filters);
}

/// Removes a module filter; the global level applies to that module again.
pub fn remove_module_filter(module_path: &str) {
    log_configuration().remove_module_level(module_path);
}

/// Log settings parsed from a command line string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogLevels {
    pub global: Option<LevelFilter>,
    pub modules: Vec<(String, LevelFilter)>,
}

impl LogLevels {
    /// Installs these settings. Modules not named keep their current filter.
    pub fn apply(&self) {
        if let Some(level) = self.global {
            set_log_level(level);
        }
        let filters: Vec<(&str, LevelFilter)> = self
            .modules
            .iter()
            .map(|(module, level)| (module.as_str(), *level))
            .collect();
        set_module_filters(&filters);
    }
}

/// Parses `LEVEL` or a comma separated list of `module=LEVEL` entries, optionally mixed with one
/// bare `LEVEL` for the global filter. Levels are case insensitive: `off`, `error`, `warn`,
/// `info`, `debug`, `trace`.
///
/// # Errors
///
/// Returns [`EpisimError::ConfigError`] for an unknown level or an empty module path.
pub fn parse_log_levels(input: &str) -> Result<LogLevels, EpisimError> {
    let mut levels = LogLevels::default();
    for entry in input.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match entry.split_once('=') {
            Some((module, level)) => {
                let module = module.trim();
                if module.is_empty() {
                    return Err(format!("missing module path in log filter '{entry}'").into());
                }
                levels.modules.push((module.to_string(), parse_level(level)?));
            }
            None => levels.global = Some(parse_level(entry)?),
        }
    }
    Ok(levels)
}

fn parse_level(level: &str) -> Result<LevelFilter, EpisimError> {
    LevelFilter::from_str(level.trim())
        .map_err(|_| EpisimError::ConfigError(format!("unknown log level '{}'", level.trim())))
}

fn log_configuration() -> MutexGuard<'static, LogConfiguration> {
    // The configuration stays consistent even if a holder panicked.
    LOG_CONFIGURATION
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}
