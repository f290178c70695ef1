use std::{fs::OpenOptions, sync::Mutex};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

/// Sends logs to `config.log_file`; stdout belongs to the terminal UI.
pub fn init(config: &AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "profit_tui={level},profit_client={level}",
            level = config.log_level
        ))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
