//! Conversion settings from an optional TOML file plus command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tonumber_model::ConversionConfig;
use tracing::debug;

/// Values given on the command line; `None` keeps the file or default value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub workbook: Option<PathBuf>,
    pub source_sheet: Option<String>,
    pub target_sheet: Option<String>,
    pub progress_interval: Option<u64>,
}

/// Build the effective configuration and check it.
pub fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<ConversionConfig> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => ConversionConfig::default(),
    };
    apply_overrides(&mut config, overrides);
    config.validate().context("invalid conversion settings")?;
    debug!(
        workbook = %config.workbook_path.display(),
        source_sheet = %config.source_sheet,
        target_sheet = %config.target_sheet,
        columns = %config.column_span_label(),
        first_data_row = config.first_data_row,
        "settings resolved"
    );
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<ConversionConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parse config file {}", path.display()))
}

fn apply_overrides(config: &mut ConversionConfig, overrides: &ConfigOverrides) {
    if let Some(workbook) = &overrides.workbook {
        config.workbook_path.clone_from(workbook);
    }
    if let Some(source) = &overrides.source_sheet {
        config.source_sheet.clone_from(source);
    }
    if let Some(target) = &overrides.target_sheet {
        config.target_sheet.clone_from(target);
    }
    if let Some(interval) = overrides.progress_interval {
        config.progress_interval = interval;
    }
}
