use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use flock_core::SimulationConfig;

/// Parse a JSON parameter set; missing fields keep their defaults.
pub fn parse_config(json: &str) -> Result<SimulationConfig> {
    let config: SimulationConfig = serde_json::from_str(json).context("Invalid config JSON")?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<SimulationConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&json).with_context(|| format!("Bad config file {}", path.display()))
}
