//! Action log sink for simulated turns
//!
//! The simulation functions accept an optional `&mut ActionLog` and append
//! one entry per state-changing action. Whether a log is supplied never
//! changes what happens, only whether it is recorded.

use serde::{Deserialize, Serialize};

/// Verbosity level for action output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Silent - nothing
    Silent = 0,
    /// Minimal - turn summaries only
    Minimal = 1,
    /// Normal - every state-changing action (default)
    #[default]
    Normal = 2,
    /// Verbose - actions plus the reasoning behind choices
    Verbose = 3,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// One recorded action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    /// Turn the action happened on
    pub turn: u32,
    pub message: String,
}

/// Append-only list of human-readable action strings
#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    turn: u32,
    entries: Vec<LogEntry>,
}

impl ActionLog {
    /// Create a log printing Normal-level messages to stdout
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log with specified verbosity
    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        ActionLog {
            verbosity,
            ..Self::default()
        }
    }

    /// Create a log that captures everything in memory and prints nothing
    pub fn capture() -> Self {
        ActionLog {
            verbosity: VerbosityLevel::Verbose,
            output_mode: OutputMode::Memory,
            ..Self::default()
        }
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    /// Tag subsequent entries with `turn`
    pub fn set_turn(&mut self, turn: u32) {
        self.turn = turn;
    }

    /// Captured entries
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Captured messages, oldest first
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Log at Minimal level
    pub fn minimal(&mut self, message: &str) {
        self.record(VerbosityLevel::Minimal, message);
    }

    /// Log at Normal level
    pub fn normal(&mut self, message: &str) {
        self.record(VerbosityLevel::Normal, message);
    }

    /// Log at Verbose level
    pub fn verbose(&mut self, message: &str) {
        self.record(VerbosityLevel::Verbose, message);
    }

    fn record(&mut self, level: VerbosityLevel, message: &str) {
        if level > self.verbosity {
            return;
        }
        if matches!(self.output_mode, OutputMode::Memory | OutputMode::Both) {
            self.entries.push(LogEntry {
                level,
                turn: self.turn,
                message: message.to_string(),
            });
        }
        if matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both) {
            if level == VerbosityLevel::Minimal {
                println!("{}", message);
            } else {
                println!("  {}", message);
            }
        }
    }
}

/// Record a Normal-level action on an `Option<&mut ActionLog>`
///
/// Expands to a single block, so it also works as a match arm. When the
/// verbose-logging feature is disabled this compiles to nothing, so the
/// `format!` allocation disappears from hot simulation loops.
macro_rules! log_action {
    ($log:expr, $($arg:tt)*) => {{
        #[cfg(feature = "verbose-logging")]
        let _ = $log.as_deref_mut().map(|log| log.normal(&format!($($arg)*)));
        #[cfg(not(feature = "verbose-logging"))]
        let _ = &$log;
    }};
}

/// Record a Verbose-level detail on an `Option<&mut ActionLog>`
macro_rules! log_detail {
    ($log:expr, $($arg:tt)*) => {{
        #[cfg(feature = "verbose-logging")]
        let _ = $log.as_deref_mut().map(|log| log.verbose(&format!($($arg)*)));
        #[cfg(not(feature = "verbose-logging"))]
        let _ = &$log;
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_records_turn() {
        let mut log = ActionLog::capture();
        log.set_turn(3);
        log.normal("Played Forest");
        log.verbose("Considered 2 lands");

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].turn, 3);
        assert_eq!(log.messages().next(), Some("Played Forest"));
    }

    #[test]
    fn test_verbosity_filters_entries() {
        let mut log = ActionLog::with_verbosity(VerbosityLevel::Normal);
        log.set_output_mode(OutputMode::Memory);
        log.verbose("hidden");
        log.normal("shown");
        log.minimal("summary");

        let messages: Vec<_> = log.messages().collect();
        assert_eq!(messages, vec!["shown", "summary"]);
    }

    #[test]
    fn test_macro_with_absent_sink() {
        let mut sink: Option<&mut ActionLog> = None;
        log_action!(sink, "nothing {}", 1);
        assert!(sink.is_none());

        let mut log = ActionLog::capture();
        let mut sink = Some(&mut log);
        log_action!(sink, "Cast {}", "Sol Ring");
        log_detail!(sink, "detail");
        assert_eq!(log.len(), if cfg!(feature = "verbose-logging") { 2 } else { 0 });
    }
}
