//! Without the `logging` feature no logger is installed; the configuration only drives the
//! `log` crate's max level so disabled macros stay cheap.

use super::LogConfiguration;

impl LogConfiguration {
    pub(super) fn apply(&mut self) {
        log::set_max_level(self.global_level);
    }
}
