//! # Pad Bridge
//!
//! Emulate a Nintendo-Switch-style gamepad over a USB HID gadget.
//!
//! This application opens the gadget device, brings the virtual
//! controller to a known neutral state, and then drives a scripted
//! automation loop that presses one configured button at a fixed
//! cadence.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use pad_bridge::config::Config;
use pad_bridge::controller::sequencer::ActionSequencer;
use pad_bridge::report::layout::Button;
use pad_bridge::sink::UsbGadgetSink;
use pad_bridge::timing::StdSleeper;

/// Configuration file consulted when no path argument is given
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Main entry point for the Pad Bridge application
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load configuration (optional first CLI argument; defaults when
///      the file is absent)
///    - Open the USB HID gadget device
///    - Construct the sequencer, which transmits the initial neutral
///      report (retried once if the gadget is not ready yet)
///
/// 2. **Main Loop**
///    - Press the configured button with the configured post-delay
///    - Log status every N presses
///
/// The loop is blocking and runs until the process is terminated.
///
/// # Errors
///
/// Returns error if:
/// - The configuration file exists but is invalid
/// - No gadget device can be opened
/// - Report transmission fails
fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Pad Bridge v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = if Path::new(&config_path).exists() {
        info!("Loading configuration from {}", config_path);
        Config::load(&config_path)?
    } else {
        info!("No configuration file at {}, using defaults", config_path);
        Config::default()
    };

    let button = Button::from_name(&config.automation.button)
        .ok_or_else(|| anyhow::anyhow!("unknown button name: {}", config.automation.button))?;

    // Open the gadget device
    let sink = if config.gadget.device_path.is_empty() {
        UsbGadgetSink::open()?
    } else {
        UsbGadgetSink::open_with_paths(&[config.gadget.device_path.as_str()])?
    };
    info!("HID gadget opened at: {}", sink.device_path());

    // Construct the sequencer; this transmits the initial neutral report
    let mut sequencer = ActionSequencer::with_timing(
        sink,
        StdSleeper,
        Duration::from_millis(config.timing.press_duration_ms),
        Duration::from_millis(config.timing.init_retry_backoff_ms),
    )?;

    let post_delay = Duration::from_millis(config.automation.post_delay_ms);
    info!(
        "Pressing {:?} every {:?} (hold {:?}), press Ctrl+C to exit",
        button,
        post_delay,
        sequencer.press_duration()
    );

    let mut press_count: u64 = 0;

    // Main automation loop
    loop {
        sequencer.push_button(button, post_delay, 1)?;
        press_count += 1;

        if press_count % config.automation.log_interval_presses == 0 {
            info!("Sent {} presses of {:?}", press_count, button);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path() {
        assert_eq!(DEFAULT_CONFIG_PATH, "config/default.toml");
    }

    #[test]
    fn test_default_automation_button_parses() {
        // The defaults fallback must always produce a pressable button
        let config = Config::default();
        assert!(Button::from_name(&config.automation.button).is_some());
    }
}
