//! A progress bar over simulated days.
//!
//! Only one progress bar can be active at a time; the bar is a process-wide resource owned by
//! the `progress_bar` crate. Without the `progress_bar` feature, [`DayProgress`] does nothing.
//!
//! ```ignore
//! let progress = DayProgress::new(iterations);
//! for _ in 0..iterations {
//!     simulation.step_day(&mut rng);
//!     progress.increment();
//! }
//! progress.finish();
//! ```

use log::trace;
#[cfg(feature = "progress_bar")]
use progress_bar::{
    finalize_progress_bar, inc_progress_bar, init_progress_bar, set_progress_bar_action, Color,
    Style,
};

/// Handle to the day progress bar.
#[derive(Debug)]
pub struct DayProgress {
    days: usize,
}

impl DayProgress {
    /// Initializes the progress bar with the number of days to simulate.
    #[must_use]
    pub fn new(days: usize) -> Self {
        trace!("initializing day progress bar with {} days", days);
        #[cfg(feature = "progress_bar")]
        {
            init_progress_bar(days);
            set_progress_bar_action("Days", Color::Blue, Style::Bold);
        }
        DayProgress { days }
    }

    /// Advances the bar by one day.
    #[allow(clippy::unused_self)]
    pub fn increment(&self) {
        #[cfg(feature = "progress_bar")]
        inc_progress_bar();
    }

    /// Finalizes the bar.
    pub fn finish(self) {
        trace!("finishing day progress bar after {} days", self.days);
        #[cfg(feature = "progress_bar")]
        finalize_progress_bar();
    }
}
