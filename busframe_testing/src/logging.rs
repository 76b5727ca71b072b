//! Serialized access to captured log records.
//!
//! `busframe` emits `tracing` events with the `log` bridge enabled, so a
//! [`logtest::Logger`] sees them as ordinary log records. The logger is
//! process-global; [`LoggerHandle`] serializes tests that inspect it.

use std::sync::{Mutex, MutexGuard, OnceLock};

use log::Level;
use logtest::Logger;
use rstest::fixture;

/// Exclusive handle to the global capturing logger.
pub struct LoggerHandle {
    guard: MutexGuard<'static, Logger>,
}

impl LoggerHandle {
    /// Acquire the logger, discarding records left by earlier tests.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder panicked while holding the lock.
    #[must_use]
    pub fn new() -> Self {
        static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

        let logger = LOGGER.get_or_init(|| Mutex::new(Logger::start()));
        let mut guard = logger.lock().expect("logger poisoned");
        while guard.pop().is_some() {}

        Self { guard }
    }

    /// Drain captured records at `level` or more severe, as rendered messages.
    pub fn drain_messages(&mut self, level: Level) -> Vec<String> {
        let mut messages = Vec::new();
        while let Some(record) = self.guard.pop() {
            if record.level() <= level {
                messages.push(record.args().to_string());
            }
        }
        messages
    }
}

impl Default for LoggerHandle {
    fn default() -> Self { Self::new() }
}

/// rstest fixture yielding a cleared [`LoggerHandle`].
#[allow(
    unused_braces,
    reason = "rustc false positive for single line rstest fixtures"
)]
#[fixture]
pub fn logger() -> LoggerHandle { LoggerHandle::new() }

/// Assert that some captured record at `level` or above contains `needle`.
///
/// # Panics
///
/// Panics when no such record was captured.
pub fn assert_logged(logger: &mut LoggerHandle, level: Level, needle: &str) {
    let messages = logger.drain_messages(level);
    assert!(
        messages.iter().any(|message| message.contains(needle)),
        "no {level} record containing {needle:?}; captured: {messages:?}",
    );
}
