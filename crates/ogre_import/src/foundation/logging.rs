//! Logging utilities
//!
//! Importer components never log through global state directly. Each one is
//! handed an [`ImportLog`] and reports through it; [`LogFacade`] forwards to
//! the `log` crate and [`CapturedLog`] keeps the entries for inspection.

use std::cell::RefCell;

pub use log::{Level, LevelFilter};

/// Log target used for everything the importer reports
pub const LOG_TARGET: &str = "ogre_import";

/// Injected diagnostics sink with levels
pub trait ImportLog {
    /// Record a message at the given level
    fn record(&self, level: Level, message: &str);

    /// Whether a record at `level` would be kept
    ///
    /// Callers check this before building per-vertex messages.
    fn enabled(&self, _level: Level) -> bool {
        true
    }

    /// Record an error
    fn error(&self, message: &str) {
        self.record(Level::Error, message);
    }

    /// Record a warning
    fn warn(&self, message: &str) {
        self.record(Level::Warn, message);
    }

    /// Record standard progress information
    fn info(&self, message: &str) {
        self.record(Level::Info, message);
    }

    /// Record verbose information
    fn debug(&self, message: &str) {
        self.record(Level::Debug, message);
    }

    /// Record per-vertex and per-line dumps
    fn trace(&self, message: &str) {
        self.record(Level::Trace, message);
    }
}

/// Forwards every record to the `log` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacade;

impl ImportLog for LogFacade {
    fn record(&self, level: Level, message: &str) {
        log::log!(target: LOG_TARGET, level, "{}", message);
    }

    fn enabled(&self, level: Level) -> bool {
        log::log_enabled!(target: LOG_TARGET, level)
    }
}

/// Keeps every record up to a maximum level in memory
#[derive(Debug)]
pub struct CapturedLog {
    entries: RefCell<Vec<(Level, String)>>,
    max_level: LevelFilter,
}

impl Default for CapturedLog {
    fn default() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            max_level: LevelFilter::Trace,
        }
    }
}

impl CapturedLog {
    /// Create an empty capture keeping every level
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty capture dropping records above `max_level`
    pub fn with_max_level(max_level: LevelFilter) -> Self {
        Self {
            max_level,
            ..Self::default()
        }
    }

    /// Snapshot of all captured entries in order
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.borrow().clone()
    }

    /// Number of entries at exactly `level`
    pub fn count(&self, level: Level) -> usize {
        self.entries.borrow().iter().filter(|(l, _)| *l == level).count()
    }

    /// Whether any entry at `level` contains `needle`
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|(l, message)| *l == level && message.contains(needle))
    }
}

impl ImportLog for CapturedLog {
    fn record(&self, level: Level, message: &str) {
        if self.enabled(level) {
            self.entries.borrow_mut().push((level, message.to_string()));
        }
    }

    fn enabled(&self, level: Level) -> bool {
        level <= self.max_level
    }
}

/// Map the importer verbosity (0-3) to a level filter
///
/// - 0: fatal errors only
/// - 1: standard logging
/// - 2: verbose logging
/// - 3: debug dumps of vertex data and material lines
pub fn verbosity_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialize the logging system for the given verbosity
///
/// `RUST_LOG` still overrides the filter when set.
pub fn init(verbosity: u8) {
    let _ = env_logger::Builder::new()
        .filter_level(verbosity_filter(verbosity))
        .parse_default_env()
        .try_init();
}
