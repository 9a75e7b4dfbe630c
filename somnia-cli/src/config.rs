use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use somnia_foundation::SleepCycleConfig;

/// Directives used when neither `RUST_LOG` nor the config file sets a filter.
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub cycle: SleepCycleConfig,
    pub log_filter: Option<String>,
}

impl AppConfig {
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

pub fn load(path: Option<&Path>) -> Result<AppConfig> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

fn parse(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents)?;
    config.cycle.validate()?;
    Ok(config)
}
