//! # Timing Module
//!
//! Blocking delay seam for the sequencer's timed operations.
//!
//! Every wait in a timed macro is a blocking sleep on the calling thread;
//! the trait exists so tests can replace real time with a recording fake.

use std::time::Duration;

/// Default hold time for a button or hat press (40 ms)
pub const DEFAULT_PRESS_DURATION: Duration = Duration::from_millis(40);

/// Backoff before the single retry of the initial reset (1 s)
pub const INIT_RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Trait for blocking delays
pub trait Sleeper {
    /// Block the calling thread for `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// Production sleeper backed by [`std::thread::sleep`]
#[derive(Debug, Default, Clone, Copy)]
pub struct StdSleeper;

impl Sleeper for StdSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Recording sleeper for testing timed macros without real delays
    #[derive(Clone)]
    pub struct RecordingSleeper {
        slept: Arc<Mutex<Vec<Duration>>>,
    }

    impl RecordingSleeper {
        pub fn new() -> Self {
            Self {
                slept: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Every duration slept so far, in order
        pub fn slept_durations(&self) -> Vec<Duration> {
            self.slept.lock().unwrap().clone()
        }
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&mut self, duration: Duration) {
            self.slept.lock().unwrap().push(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_constants() {
        assert_eq!(DEFAULT_PRESS_DURATION, Duration::from_millis(40));
        assert_eq!(INIT_RETRY_BACKOFF, Duration::from_secs(1));
    }

    #[test]
    fn test_std_sleeper_blocks_for_at_least_duration() {
        let mut sleeper = StdSleeper;
        let start = std::time::Instant::now();
        sleeper.sleep(Duration::from_millis(10));
        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn test_recording_sleeper_records_in_order() {
        use super::mocks::RecordingSleeper;

        let mut sleeper = RecordingSleeper::new();
        sleeper.sleep(Duration::from_millis(40));
        sleeper.sleep(Duration::from_millis(100));
        assert_eq!(
            sleeper.slept_durations(),
            vec![Duration::from_millis(40), Duration::from_millis(100)]
        );
    }
}
