use tracing_subscriber::EnvFilter;

use crate::error::{LabError, Result};

/// Build the filter: `RUST_LOG` wins, otherwise `level` from config.
pub fn build_env_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .map_err(|err| LabError::config(format!("Invalid log level '{level}': {err}"))),
    }
}

/// Install the global console subscriber. Logs go to stderr so they never
/// interleave with the demo output on stdout.
pub fn init(level: &str) -> Result<()> {
    let filter = build_env_filter(level)?;
    // Already initialized (e.g. by a test harness) is fine.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init("warn").unwrap();
        init("debug").unwrap();
    }
}
