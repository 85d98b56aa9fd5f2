//! Trait abstraction for report transmission to enable testing

use std::io;

use crate::report::layout::REPORT_LEN;

/// Trait for transmitting a complete input report to the host
///
/// The only contract with the transport: accept a fixed-length buffer,
/// return success or a recoverable I/O error. Implementations must not
/// reorder or drop reports; the host interprets each one as the full
/// controller state.
pub trait ReportSink {
    /// Transmit one report
    fn send_report(&mut self, report: &[u8; REPORT_LEN]) -> io::Result<()>;
}
