//! Logger setup.
//!
//! Logs go to stderr through `env_logger`. `MYPA_LOG` takes the usual
//! filter syntax (`debug`, `mypa::features=trace`) and wins over `-v`.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "MYPA_LOG";

/// Level for a `-v` count: warn, then info, debug, trace.
#[must_use]
pub const fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger. Later calls are no-ops.
pub fn init(verbosity: u8) {
    let result = Builder::new()
        .filter_level(level_for(verbosity))
        .parse_env(Env::new().filter(LOG_ENV))
        .format_timestamp(None)
        .format_target(verbosity > 1)
        .try_init();

    if result.is_ok() {
        log::debug!("logging at {}", level_for(verbosity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0), LevelFilter::Warn);
        assert_eq!(level_for(1), LevelFilter::Info);
        assert_eq!(level_for(2), LevelFilter::Debug);
        assert_eq!(level_for(7), LevelFilter::Trace);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(0);
        init(3);
    }
}
