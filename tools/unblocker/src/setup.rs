use crate::cli::Cli;
use anyhow::{Context, Result};
use log::{debug, info};
use unblocker_core::config::AppConfig;
use unblocker_core::store::dataset::Dataset;

pub fn init_logging(args: &Cli) {
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    debug!("Debug logging enabled");
}

pub fn load_configuration(args: &Cli) -> Result<AppConfig> {
    let mut cfg = AppConfig::load(args.config.as_deref()).with_context(|| match &args.config {
        Some(path) => format!("Failed to load config file: {}", path.display()),
        None => "Failed to load default config".to_string(),
    })?;
    if let Some(dir) = &args.data_dir {
        debug!("data dir overridden to {}", dir.display());
        cfg.data.dir = dir.clone();
    }
    Ok(cfg)
}

pub fn load_dataset(cfg: &AppConfig) -> Result<Dataset> {
    info!("Loading tables from {}", cfg.data.dir.display());
    Dataset::load(&cfg.data.sources())
        .with_context(|| format!("Failed to load tables from {}", cfg.data.dir.display()))
}
