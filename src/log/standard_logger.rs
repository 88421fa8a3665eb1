use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::encode::Encode;
use log4rs::Config;

#[cfg(feature = "progress_bar")]
use super::progress_bar_encoder::ClearLineEncoder;
use super::LogConfiguration;

// ISO 8601 timestamp, colored level, module path.
const LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%SZ)} {h({l})} {t} - {m}{n}";

impl LogConfiguration {
    /// Pushes this configuration to the `log4rs` logger, installing it on first use.
    pub(super) fn apply(&mut self) {
        let encoder: Box<dyn Encode> = Box::new(PatternEncoder::new(LOG_PATTERN));
        #[cfg(feature = "progress_bar")]
        let encoder: Box<dyn Encode> = Box::new(ClearLineEncoder::new(encoder));
        let console = ConsoleAppender::builder().encoder(encoder).build();

        let loggers = self
            .module_levels
            .iter()
            .map(|(module, level)| Logger::builder().build(module.clone(), *level));
        let config = Config::builder()
            .appender(Appender::builder().build("console", Box::new(console)))
            .loggers(loggers)
            .build(Root::builder().appender("console").build(self.global_level));
        let config = match config {
            Ok(config) => config,
            Err(e) => {
                eprintln!("episim: invalid log configuration: {e}");
                return;
            }
        };

        if let Some(handle) = &self.handle {
            handle.set_config(config);
            return;
        }
        match log4rs::init_config(config) {
            Ok(handle) => self.handle = Some(handle),
            // Another logger owns the process; leave it alone.
            Err(e) => eprintln!("episim: could not install logger: {e}"),
        }
    }
}
