//! # Action Sequencer Module
//!
//! Mediates every controller state change through the cycle
//! mutate, encode, transmit, and builds timed macros on top of it.
//!
//! The model is fully synchronous and blocking: each operation runs to
//! completion on the caller's thread, every mutation is transmitted
//! before the next may occur, and waits are blocking sleeps. This keeps
//! reports totally ordered, which the host requires because it treats
//! each report as the complete controller state rather than a delta.
//!
//! There is no cancellation: once a timed operation begins it runs to
//! completion. Callers wanting responsiveness compose shorter primitive
//! operations themselves.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{PadBridgeError, Result};
use crate::report::encoder::encode_report;
use crate::report::layout::{Button, HatPosition, StickDirection};
use crate::sink::report_sink::ReportSink;
use crate::timing::{Sleeper, DEFAULT_PRESS_DURATION, INIT_RETRY_BACKOFF};

use super::state::ControllerState;

/// Timed gamepad action sequencer
///
/// Owns the controller state, the report sink, and the delay source for
/// the controller's lifetime. Construction transmits an all-neutral
/// report; if that first transmission fails (the device may not be ready
/// yet), it waits a fixed backoff and retries exactly once. Any later
/// transport failure aborts the in-flight operation without retry and
/// without rolling back state or already-elapsed delays.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use pad_bridge::controller::sequencer::ActionSequencer;
/// use pad_bridge::report::layout::Button;
/// use pad_bridge::sink::UsbGadgetSink;
/// use pad_bridge::timing::StdSleeper;
///
/// let sink = UsbGadgetSink::open()?;
/// let mut pad = ActionSequencer::new(sink, StdSleeper)?;
///
/// // Press A three times, 100 ms apart
/// pad.push_button(Button::A, Duration::from_millis(100), 3)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ActionSequencer<S: ReportSink, T: Sleeper> {
    state: ControllerState,
    sink: S,
    sleeper: T,
    press_duration: Duration,
    init_retry_backoff: Duration,
}

impl<S: ReportSink, T: Sleeper> ActionSequencer<S, T> {
    /// Create a sequencer with the default press duration and retry
    /// backoff, and transmit the initial all-neutral report.
    ///
    /// # Errors
    ///
    /// Returns [`PadBridgeError::Transport`] if the initial report fails
    /// twice (one automatic retry after the backoff).
    pub fn new(sink: S, sleeper: T) -> Result<Self> {
        Self::with_timing(sink, sleeper, DEFAULT_PRESS_DURATION, INIT_RETRY_BACKOFF)
    }

    /// Create a sequencer with explicit timing parameters.
    ///
    /// # Arguments
    ///
    /// * `press_duration` - Default hold time for button and hat presses
    /// * `init_retry_backoff` - Wait before the single initial-reset retry
    pub fn with_timing(
        sink: S,
        sleeper: T,
        press_duration: Duration,
        init_retry_backoff: Duration,
    ) -> Result<Self> {
        let mut sequencer = Self {
            state: ControllerState::new(),
            sink,
            sleeper,
            press_duration,
            init_retry_backoff,
        };

        // The gadget may not be ready right after enumeration; give it
        // one backoff period and try again before giving up.
        if let Err(first) = sequencer.reset_all() {
            warn!(
                "initial reset failed, retrying in {:?}: {}",
                sequencer.init_retry_backoff, first
            );
            sequencer.wait(sequencer.init_retry_backoff);
            sequencer.reset_all()?;
        }

        Ok(sequencer)
    }

    /// Current controller state.
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Default hold time used by [`push_button`](Self::push_button),
    /// [`push_hat`](Self::push_hat), and [`hold_hat`](Self::hold_hat).
    pub fn press_duration(&self) -> Duration {
        self.press_duration
    }

    /// Change the default press hold time.
    pub fn set_press_duration(&mut self, duration: Duration) {
        self.press_duration = duration;
    }

    // ==================== Primitive Operations ====================

    /// Press a button and transmit the updated state.
    pub fn press(&mut self, button: Button) -> Result<()> {
        self.state.press_button(button);
        self.send_state()
    }

    /// Release a button and transmit the updated state.
    pub fn release(&mut self, button: Button) -> Result<()> {
        self.state.release_button(button);
        self.send_state()
    }

    /// Press the hat switch into a position and transmit.
    pub fn press_hat(&mut self, position: HatPosition) -> Result<()> {
        self.state.set_hat(position);
        self.send_state()
    }

    /// Return the hat switch to center and transmit.
    pub fn release_hat(&mut self) -> Result<()> {
        self.state.center_hat();
        self.send_state()
    }

    /// Set all four stick axes from deflection percentages and transmit.
    ///
    /// Percentages are nominally -100 to 100; out-of-range values
    /// saturate at the byte boundary.
    pub fn set_stick_tilt(
        &mut self,
        lx_pct: i32,
        ly_pct: i32,
        rx_pct: i32,
        ry_pct: i32,
    ) -> Result<()> {
        self.state.set_stick_tilt(lx_pct, ly_pct, rx_pct, ry_pct);
        self.send_state()
    }

    /// Reset everything to neutral and transmit.
    pub fn reset_all(&mut self) -> Result<()> {
        self.state.reset();
        self.send_state()
    }

    // ==================== Timed Operations ====================

    /// Press a button `repeat_count` times with the default hold time.
    ///
    /// Each cycle: press, hold for the default press duration, release,
    /// hold for `post_delay`. A `repeat_count` of zero transmits nothing.
    pub fn push_button(
        &mut self,
        button: Button,
        post_delay: Duration,
        repeat_count: u32,
    ) -> Result<()> {
        self.push_button_timed(button, self.press_duration, post_delay, repeat_count)
    }

    /// Press a button `repeat_count` times with a caller-supplied hold
    /// time.
    ///
    /// # Arguments
    ///
    /// * `button` - Button to press
    /// * `press_duration` - How long the button stays pressed
    /// * `post_delay` - Wait after each release
    /// * `repeat_count` - Number of press/release cycles
    pub fn push_button_timed(
        &mut self,
        button: Button,
        press_duration: Duration,
        post_delay: Duration,
        repeat_count: u32,
    ) -> Result<()> {
        for _ in 0..repeat_count {
            self.press(button)?;
            self.wait(press_duration);
            self.release(button)?;
            self.wait(post_delay);
        }
        Ok(())
    }

    /// Press the hat switch `repeat_count` times with the default hold
    /// time.
    ///
    /// Same cycle as [`push_button`](Self::push_button), on the hat.
    pub fn push_hat(
        &mut self,
        position: HatPosition,
        post_delay: Duration,
        repeat_count: u32,
    ) -> Result<()> {
        for _ in 0..repeat_count {
            self.press_hat(position)?;
            self.wait(self.press_duration);
            self.release_hat()?;
            self.wait(post_delay);
        }
        Ok(())
    }

    /// Hold the hat switch in a position for `hold_duration`.
    ///
    /// Presses, holds, releases, then holds the default press duration
    /// before returning.
    pub fn hold_hat(&mut self, position: HatPosition, hold_duration: Duration) -> Result<()> {
        self.press_hat(position)?;
        self.wait(hold_duration);
        self.release_hat()?;
        self.wait(self.press_duration);
        Ok(())
    }

    /// Tilt the sticks for `hold_duration`, then optionally re-center.
    ///
    /// With a non-zero `post_delay` the sticks are returned to center
    /// after the hold and the delay is observed. With a zero `post_delay`
    /// the sticks are left tilted on return (hold-open mode), so a
    /// caller can layer button presses on a sustained tilt.
    pub fn tilt_for(
        &mut self,
        lx_pct: i32,
        ly_pct: i32,
        rx_pct: i32,
        ry_pct: i32,
        hold_duration: Duration,
        post_delay: Duration,
    ) -> Result<()> {
        self.set_stick_tilt(lx_pct, ly_pct, rx_pct, ry_pct)?;
        self.wait(hold_duration);

        if !post_delay.is_zero() {
            self.set_stick_tilt(0, 0, 0, 0)?;
            self.wait(post_delay);
        }
        Ok(())
    }

    /// Tilt the left stick in a compass direction for `hold_duration`.
    ///
    /// Only cardinal directions deflect the stick; diagonals map to
    /// center on both axes. Delegates to [`tilt_for`](Self::tilt_for),
    /// including its hold-open behavior on a zero `post_delay`.
    pub fn use_left_stick(
        &mut self,
        direction: StickDirection,
        hold_duration: Duration,
        post_delay: Duration,
    ) -> Result<()> {
        let (x_pct, y_pct) = direction.axis_percentages();
        self.tilt_for(x_pct, y_pct, 0, 0, hold_duration, post_delay)
    }

    /// Tilt the right stick in a compass direction for `hold_duration`.
    ///
    /// Mirror of [`use_left_stick`](Self::use_left_stick).
    pub fn use_right_stick(
        &mut self,
        direction: StickDirection,
        hold_duration: Duration,
        post_delay: Duration,
    ) -> Result<()> {
        let (x_pct, y_pct) = direction.axis_percentages();
        self.tilt_for(0, 0, x_pct, y_pct, hold_duration, post_delay)
    }

    // ==================== Internals ====================

    /// Encode the current state and transmit it.
    fn send_state(&mut self) -> Result<()> {
        let report = encode_report(&self.state);
        self.sink
            .send_report(&report)
            .map_err(PadBridgeError::Transport)?;

        debug!("Sent input report: {:02x?}", report);
        Ok(())
    }

    /// Block for `duration`; zero means no wait.
    fn wait(&mut self, duration: Duration) {
        if !duration.is_zero() {
            self.sleeper.sleep(duration);
        }
    }
}
