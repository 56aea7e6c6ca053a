//! Configuration for pisearch

use digitstore::Encoding;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::context::DEFAULT_CONTEXT_RADIUS;
use crate::search::{DEFAULT_WINDOW_SIZE, SearchStrategy, StrategyKind};

/// Main pisearch configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub log_level: Option<String>,

    /// Digit file location and layout
    pub digits: DigitsConfig,

    /// Search tuning
    pub search: SearchConfig,
}

/// Digit file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DigitsConfig {
    /// Path to the digit file
    pub path: PathBuf,

    /// On-disk layout of the digit file
    pub encoding: Encoding,
}

impl Default for DigitsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("pi_digits.txt"),
            encoding: Encoding::Unpacked,
        }
    }
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub strategy: StrategyKind,

    /// Digits decoded per chunk by the chunked strategy
    pub window_size: usize,

    /// Digits shown on each side of a match
    pub context_radius: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Chunked,
            window_size: DEFAULT_WINDOW_SIZE,
            context_radius: DEFAULT_CONTEXT_RADIUS,
        }
    }
}

impl SearchConfig {
    pub fn search_strategy(&self) -> SearchStrategy {
        self.strategy.with_window(self.window_size)
    }
}

impl Config {
    /// Validate configuration before use
    ///
    /// Call this before opening the digit file to fail fast with clear error
    /// messages.
    pub fn validate(&self) -> Result<()> {
        if !self.digits.path.is_file() {
            return Err(eyre::eyre!(
                "Digit file not found: {}. Set digits.path in the config or pass --digits.",
                self.digits.path.display()
            ));
        }
        if self.search.window_size == 0 {
            return Err(eyre::eyre!("search.window_size must be greater than zero"));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    ///
    /// Returns what happened along the chain so the caller can log it once
    /// the subscriber (whose level may come from this config) is installed.
    pub fn load(config_path: Option<&PathBuf>) -> Result<(Self, Vec<LoadEvent>)> {
        if let Some(path) = config_path {
            let config =
                Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()))?;
            return Ok((config, vec![LoadEvent::Loaded(path.clone())]));
        }

        // Project-local .pisearch.yml, then ~/.config/pisearch/pisearch.yml
        let mut candidates = vec![PathBuf::from(".pisearch.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("pisearch").join("pisearch.yml"));
        }

        Ok(Self::load_first(&candidates))
    }

    /// Load the first candidate that exists and parses, skipping broken ones
    fn load_first(candidates: &[PathBuf]) -> (Self, Vec<LoadEvent>) {
        let mut events = Vec::new();

        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => {
                    events.push(LoadEvent::Loaded(path.clone()));
                    return (config, events);
                }
                Err(e) => events.push(LoadEvent::Skipped {
                    path: path.clone(),
                    error: format!("{:#}", e),
                }),
            }
        }

        events.push(LoadEvent::Defaults);
        (Self::default(), events)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

/// One step of the config fallback chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEvent {
    Loaded(PathBuf),
    /// Candidate existed but could not be read or parsed
    Skipped { path: PathBuf, error: String },
    Defaults,
}

impl LoadEvent {
    pub fn log(&self) {
        match self {
            LoadEvent::Loaded(path) => tracing::info!("Loaded config from: {}", path.display()),
            LoadEvent::Skipped { path, error } => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), error)
            }
            LoadEvent::Defaults => tracing::info!("No config file found, using defaults"),
        }
    }
}
