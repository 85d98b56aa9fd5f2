//! # Pad Bridge Library
//!
//! Emulate a Nintendo-Switch-style gamepad over a USB HID gadget.
//!
//! This library maintains the logical state of a virtual controller
//! (buttons, hat switch, two analog sticks), serializes it into the fixed
//! 8-byte input report the host expects, and provides timed macro helpers
//! for scripted input sequences.

pub mod config;
pub mod error;
pub mod report;
pub mod controller;
pub mod sink;
pub mod timing;
