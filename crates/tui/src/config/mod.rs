use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/profit_tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub log_file: String,
    pub log_level: String,
    /// Rows per page in the calculations table.
    pub page_size: usize,
    /// Screen shown at startup, e.g. `/shipments/3`.
    pub route: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            log_file: "profit_tui.log".to_string(),
            log_level: "info".to_string(),
            page_size: 5,
            route: "/".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "profit_tui", about = "Shipment profit/loss tracker")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override backend base URL (e.g. http://127.0.0.1:8080).
    #[arg(long)]
    base_url: Option<String>,
    /// Override log file path.
    #[arg(long)]
    log_file: Option<String>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
    /// Override calculations page size (5, 10, 25 or 100).
    #[arg(long)]
    page_size: Option<usize>,
    /// Start on this screen (`/shipments` or `/shipments/<id>`).
    #[arg(long)]
    route: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("PROFIT_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }
    if let Some(route) = args.route {
        settings.route = route;
    }

    Ok(settings)
}
