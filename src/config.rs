use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::SeriesError;
use crate::indicator::spec::IndicatorSpec;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "OHLCV_SERIES_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// What to synthesize for intervals that saw no activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyIntervalPolicy {
    /// O=H=L=C = last known close, V = 0.
    #[default]
    UseLastClose,
    /// No filler bars; the gap stays sparse.
    Ignore,
    /// O=H=L=C=V = 0.
    UseZeros,
}

/// What to do with an observation whose interval precedes the last bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleInputPolicy {
    /// Drop it and log a warning.
    #[default]
    Ignore,
    /// Fail the ingestion call with `SeriesError::StaleObservation`.
    Reject,
}

/// Fixed at series construction and handed unchanged to every indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub interval_secs: u64,
    /// Advisory upper bound on retained bars; also bounds indicator windows.
    pub max_bars: usize,
    #[serde(default)]
    pub empty_interval: EmptyIntervalPolicy,
    #[serde(default)]
    pub stale_input: StaleInputPolicy,
}

impl SeriesConfig {
    pub fn new(interval_secs: u64, max_bars: usize) -> Self {
        Self {
            interval_secs,
            max_bars,
            empty_interval: EmptyIntervalPolicy::default(),
            stale_input: StaleInputPolicy::default(),
        }
    }

    pub fn with_empty_interval(mut self, policy: EmptyIntervalPolicy) -> Self {
        self.empty_interval = policy;
        self
    }

    pub fn with_stale_input(mut self, policy: StaleInputPolicy) -> Self {
        self.stale_input = policy;
        self
    }

    pub fn validate(&self) -> Result<(), SeriesError> {
        if self.interval_secs == 0 {
            return Err(SeriesError::Config("interval must be positive".to_string()));
        }
        if self.max_bars == 0 {
            return Err(SeriesError::Config("max bars must be positive".to_string()));
        }
        Ok(())
    }
}

/// Parse an interval string (e.g. "30s", "5m", "1h", "1d") into seconds.
pub fn parse_interval_secs(s: &str) -> Result<u64> {
    let s = s.trim();
    if s.len() < 2 {
        bail!("invalid interval '{}': expected format like '5m'", s);
    }

    let Some((split, _)) = s.char_indices().last() else {
        bail!("invalid interval '{}': expected format like '5m'", s);
    };
    let (num_str, suffix) = s.split_at(split);
    let n: u64 = num_str.parse().with_context(|| {
        format!(
            "invalid interval '{}': quantity must be a positive integer",
            s
        )
    })?;
    if n == 0 {
        bail!("invalid interval '{}': quantity must be > 0", s);
    }

    let unit_secs = match suffix {
        "s" => 1,
        "m" => 60,
        "h" => 3_600,
        "d" => 86_400,
        _ => bail!(
            "invalid interval '{}': unsupported suffix '{}', expected one of s/m/h/d",
            s,
            suffix
        ),
    };

    n.checked_mul(unit_secs)
        .with_context(|| format!("invalid interval '{}': value is too large", s))
}

/// On-disk configuration for the replay binary.
#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    pub series: SeriesSection,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub indicators: Vec<NamedIndicator>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeriesSection {
    pub interval: String,
    pub max_bars: usize,
    #[serde(default)]
    pub empty_interval: EmptyIntervalPolicy,
    #[serde(default)]
    pub stale_input: StaleInputPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedIndicator {
    pub name: String,
    pub indicator: IndicatorSpec,
}

impl SeriesSection {
    pub fn interval_secs(&self) -> Result<u64> {
        parse_interval_secs(&self.interval)
    }

    pub fn to_series_config(&self) -> Result<SeriesConfig> {
        let config = SeriesConfig::new(self.interval_secs()?, self.max_bars)
            .with_empty_interval(self.empty_interval)
            .with_stale_input(self.stale_input);
        config.validate()?;
        Ok(config)
    }
}

impl FileConfig {
    pub fn from_toml(s: &str) -> Result<Self> {
        let config: FileConfig = toml::from_str(s).context("failed to parse series config")?;
        config
            .series
            .to_series_config()
            .context("series section is invalid")?;
        Ok(config)
    }

    /// Path from `OHLCV_SERIES_CONFIG` (after loading `.env`), or the default.
    pub fn resolve_path() -> PathBuf {
        dotenvy::dotenv().ok();
        std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&config_str).with_context(|| format!("invalid config {}", path.display()))
    }
}
