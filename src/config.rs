//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::report::layout::Button;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub gadget: GadgetConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub automation: AutomationConfig,
}

/// HID gadget device configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GadgetConfig {
    /// Gadget device path; empty means auto-detect
    #[serde(default)]
    pub device_path: String,
}

/// Sequencer timing configuration
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    /// Default button/hat hold time in milliseconds
    #[serde(default = "default_press_duration_ms")]
    pub press_duration_ms: u64,

    /// Backoff before the single initial-reset retry, in milliseconds
    #[serde(default = "default_init_retry_backoff_ms")]
    pub init_retry_backoff_ms: u64,
}

/// Demo automation loop configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AutomationConfig {
    /// Name of the button to press (e.g. "A", "ZL")
    #[serde(default = "default_button")]
    pub button: String,

    /// Wait after each release, in milliseconds
    #[serde(default = "default_post_delay_ms")]
    pub post_delay_ms: u64,

    /// Emit a status log line every this many presses
    #[serde(default = "default_log_interval_presses")]
    pub log_interval_presses: u64,
}

// Default value functions
fn default_press_duration_ms() -> u64 { 40 }
fn default_init_retry_backoff_ms() -> u64 { 1000 }

fn default_button() -> String { "A".to_string() }
fn default_post_delay_ms() -> u64 { 100 }
fn default_log_interval_presses() -> u64 { 1000 }

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            press_duration_ms: default_press_duration_ms(),
            init_retry_backoff_ms: default_init_retry_backoff_ms(),
        }
    }
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            button: default_button(),
            post_delay_ms: default_post_delay_ms(),
            log_interval_presses: default_log_interval_presses(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pad_bridge::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        // Gadget device_path can be empty (auto-detect)

        if self.timing.press_duration_ms == 0 || self.timing.press_duration_ms > 10000 {
            return Err(crate::error::PadBridgeError::Config(
                toml::de::Error::custom("press_duration_ms must be between 1 and 10000")
            ));
        }

        if self.timing.init_retry_backoff_ms == 0 || self.timing.init_retry_backoff_ms > 60000 {
            return Err(crate::error::PadBridgeError::Config(
                toml::de::Error::custom("init_retry_backoff_ms must be between 1 and 60000")
            ));
        }

        if self.automation.post_delay_ms > 60000 {
            return Err(crate::error::PadBridgeError::Config(
                toml::de::Error::custom("post_delay_ms must be at most 60000")
            ));
        }

        if self.automation.log_interval_presses == 0 {
            return Err(crate::error::PadBridgeError::Config(
                toml::de::Error::custom("log_interval_presses must be greater than 0")
            ));
        }

        if Button::from_name(&self.automation.button).is_none() {
            return Err(crate::error::PadBridgeError::Config(
                toml::de::Error::custom(format!(
                    "unknown button name: {}", self.automation.button
                ))
            ));
        }

        Ok(())
    }
}
