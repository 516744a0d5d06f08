//! CLI command implementations

pub mod assess;
pub mod catalog;
pub mod reports;
pub mod scrub;
pub mod serve;

use scamshield::catalog::{default_catalog, load_catalog_from_file};
use scamshield::engine::RiskEngine;
use scamshield::Config;
use std::path::PathBuf;

/// Resolve configuration: explicit --config path, then the default config
/// file if present, then built-in defaults
pub fn resolve_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        return Config::load(&path);
    }

    let default_path = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".scamshield")
        .join("config.yaml");
    if default_path.exists() {
        return Config::load(&default_path);
    }

    Ok(Config::default())
}

/// Build the engine from config, with the catalog override applied.
/// A configured-but-broken catalog is an error, not a silent fallback.
pub fn build_engine(config: &Config) -> anyhow::Result<RiskEngine> {
    let catalog = match &config.catalog_path {
        Some(path) => load_catalog_from_file(path)?,
        None => default_catalog(),
    };
    Ok(RiskEngine::new(catalog))
}
