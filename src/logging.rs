use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Installs the stderr logger. Calling it twice keeps the first logger.
pub fn init(level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Debug)
        .build();
    if TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto).is_err() {
        log::debug!("logger already installed");
    }
}
