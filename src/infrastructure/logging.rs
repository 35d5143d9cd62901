// src/infrastructure/logging.rs

use env_logger::{Builder, Env};

/// Environment variable holding the log filter
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

const DEFAULT_FILTER: &str = "info";

/// Install the global logger. Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let env = Env::default().filter_or(LOG_FILTER_ENV, DEFAULT_FILTER);
    let _ = Builder::from_env(env)
        .format_timestamp_millis()
        .target(env_logger::Target::Stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        init_logging();
        log::debug!("logger installed");
    }
}
