//! Dashboard configuration file and defaults
//!
//! Every section is optional; missing keys fall back to the engine's
//! policy constants. Command-line flags override whatever the file says.

use amm_model::{
    validate_multiplier, CurveSettings, Pool, CURVE_X_MAX_FACTOR, CURVE_X_MIN_FACTOR,
    DASHBOARD_CURVE_STEPS, HISTORY_CAPACITY,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Looked up when no `--config` is given; silently skipped if absent
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/ammdash/config.toml";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub pool: PoolSection,
    pub curve: CurveSection,
    pub history: HistorySection,
    pub trade: TradeSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolSection {
    /// Initial X (ETH) reserve
    pub x0: f64,
    /// Initial Y (USDT) reserve
    pub y0: f64,
    /// Price multiplier used when a command does not pass one
    pub price_multiplier: f64,
}

impl Default for PoolSection {
    fn default() -> Self {
        Self {
            x0: 1000.0,
            y0: 1000.0,
            price_multiplier: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CurveSection {
    pub steps: usize,
    pub x_min_factor: f64,
    pub x_max_factor: f64,
}

impl Default for CurveSection {
    fn default() -> Self {
        Self {
            steps: DASHBOARD_CURVE_STEPS,
            x_min_factor: CURVE_X_MIN_FACTOR,
            x_max_factor: CURVE_X_MAX_FACTOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistorySection {
    pub capacity: usize,
}

impl Default for HistorySection {
    fn default() -> Self {
        Self {
            capacity: HISTORY_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TradeSection {
    /// USDT spent when a command does not pass `--usdt-in`
    pub usdt_in: f64,
}

impl DashboardConfig {
    /// Load from an explicit path, the default path, or built-in defaults
    ///
    /// An explicit path must exist. The default path is only read when it
    /// is there.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = default_config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    log::debug!("no config at {}, using defaults", default_path.display());
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Self::from_toml_str(&data)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml_str(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.curve_settings()
            .validate()
            .context("Invalid [curve] section")?;
        validate_multiplier(self.pool.price_multiplier).context("Invalid [pool] price_multiplier")?;
        Ok(())
    }

    /// Apply `--x0` / `--y0` from the command line
    pub fn apply_overrides(&mut self, x0: Option<f64>, y0: Option<f64>) {
        if let Some(x0) = x0 {
            self.pool.x0 = x0;
        }
        if let Some(y0) = y0 {
            self.pool.y0 = y0;
        }
    }

    /// Pool from the configured reserves, clamped the way the input panel does
    pub fn pool(&self) -> Pool {
        let pool = Pool::clamped(self.pool.x0, self.pool.y0);
        if pool.x0 != self.pool.x0 || pool.y0 != self.pool.y0 {
            log::warn!(
                "reserves clamped: ({}, {}) -> ({}, {})",
                self.pool.x0,
                self.pool.y0,
                pool.x0,
                pool.y0
            );
        }
        pool
    }

    pub fn curve_settings(&self) -> CurveSettings {
        CurveSettings {
            steps: self.curve.steps,
            x_min_factor: self.curve.x_min_factor,
            x_max_factor: self.curve.x_max_factor,
        }
    }
}

fn default_config_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).into_owned())
}
