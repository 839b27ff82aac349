//! Logger initialisation

use std::fs::File;

use crate::config::RunConfig;
use crate::scoring::ScoreError;

/// Install the global logger for this process.
///
/// Output goes to `log_file` when configured, stderr otherwise; stdout is
/// left to the report lines.
pub fn init_logging(config: &RunConfig) -> Result<(), ScoreError> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(config.log_level.as_filter())
        .format_timestamp_millis();

    match &config.log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(env_logger::Target::Stderr);
        }
    }

    builder
        .try_init()
        .map_err(|e| ScoreError::Config(format!("Logger already initialised: {e}")))
}
