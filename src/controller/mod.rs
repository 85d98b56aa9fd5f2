//! # Controller Module
//!
//! Virtual controller state and the timed action sequencer.
//!
//! This module handles:
//! - Canonical controller state (button mask, hat switch, stick axes)
//! - The mutate, encode, transmit cycle behind every state change
//! - Timed press and tilt macros built on that cycle

pub mod state;
pub mod sequencer;
