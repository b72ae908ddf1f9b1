//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! sleep-config.toml file. The defaults match the tuning the algorithm was
//! validated with (10 Hz sampling, 5 s windows, 5 minute history); the file
//! exists so alternative tunings can be tried against recorded data without
//! rebuilding.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration loaded from sleep-config.toml
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Accelerometer sampling configuration
    pub sampling: SamplingConfig,
    /// Classification tuning
    pub classifier: ClassifierConfig,
}

/// Accelerometer sampling configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SamplingConfig {
    /// Sample rate in Hz; the caller must deliver samples at this rate
    pub rate_hz: u32,
    /// Window duration in seconds over which arm angles are averaged
    pub window_seconds: u32,
}

/// Classification tuning parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierConfig {
    /// Exponential moving average decay factor applied per axis
    pub smoothing_eta: f32,
    /// Number of per-window angle changes retained for classification
    /// (60 windows of 5 s = a 5 minute decision memory)
    pub history_windows: usize,
    /// Window-to-window angle change in degrees treated as wake evidence
    pub angle_threshold_deg: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sampling: SamplingConfig {
                rate_hz: 10,
                window_seconds: 5,
            },
            classifier: ClassifierConfig {
                smoothing_eta: 0.005,
                history_windows: 60,
                angle_threshold_deg: 5.0,
            },
        }
    }
}

impl Config {
    /// Load configuration from sleep-config.toml file
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path("sleep-config.toml")
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Invalid config file format: {}", e);
                    eprintln!("Using default configuration (10 Hz, 5 s windows)");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save current configuration to sleep-config.toml
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write("sleep-config.toml", contents)?;
        Ok(())
    }

    /// Samples per window: rate_hz * window_seconds (50 at defaults)
    pub fn window_len(&self) -> usize {
        (self.sampling.rate_hz * self.sampling.window_seconds) as usize
    }
}
