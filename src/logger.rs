//! Colored diagnostics on stderr.
//!
//! stdout carries command output (SVG text, snapshots), so every log line
//! and progress display goes to stderr.
//!
//! - `log!` prints a line with a colored module prefix
//! - `debug!` / `debug_do!` only run with `--verbose`
//! - [`ProgressLine`] keeps a single in-place counter line
//!
//! ```ignore
//! log!("extract"; "{} files", count);
//!
//! let progress = ProgressLine::new(&[("chunks", 42)]);
//! progress.inc("chunks");
//! progress.finish();
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Whether a progress line currently owns the last terminal row.
static PROGRESS_ACTIVE: AtomicBool = AtomicBool::new(false);

// ============================================================================
// Log Macros
// ============================================================================

/// Log a message with a colored module prefix
///
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// Execute code only when --verbose is enabled
///
/// ```ignore
/// debug_do! {
///     let summary = expensive_computation();
///     debug!("module"; "result: {:?}", summary);
/// }
/// ```
#[macro_export]
macro_rules! debug_do {
    ($($body:tt)*) => {{
        if $crate::logger::is_verbose() {
            $($body)*
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut err = stderr().lock();

    // Print above an active progress line, then leave a row for it.
    let progress = PROGRESS_ACTIVE.load(Ordering::SeqCst);
    if progress {
        execute!(err, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
    }

    writeln!(err, "{prefix} {message}").ok();
    err.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str) -> String {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "sanitize" | "replay" => prefix.bright_blue().bold().to_string(),
        "export" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        "warn" | "config" => prefix.bright_magenta().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Progress Line
// ============================================================================

/// Single-line progress display with named counters.
///
/// Displays: `[replay] chunks(42/69) invalid(1/69)`
///
/// Updates use `try_lock`; a refresh is skipped while another one is drawing.
pub struct ProgressLine {
    module: &'static str,
    counters: Vec<Counter>,
    lock: Mutex<()>,
}

struct Counter {
    name: &'static str,
    total: usize,
    current: AtomicUsize,
}

impl ProgressLine {
    /// Create a progress line under the `replay` prefix.
    ///
    /// Only includes counters with total > 0.
    pub fn new(items: &[(&'static str, usize)]) -> Self {
        Self::with_module("replay", items)
    }

    pub fn with_module(module: &'static str, items: &[(&'static str, usize)]) -> Self {
        let counters = items
            .iter()
            .filter(|(_, total)| *total > 0)
            .map(|&(name, total)| Counter {
                name,
                total,
                current: AtomicUsize::new(0),
            })
            .collect();

        PROGRESS_ACTIVE.store(true, Ordering::SeqCst);

        let progress = Self {
            module,
            counters,
            lock: Mutex::new(()),
        };
        progress.display();
        progress
    }

    /// Increment the counter with the given name.
    #[inline]
    pub fn inc(&self, name: &str) {
        let Some(counter) = self.counters.iter().find(|c| c.name == name) else {
            return;
        };
        counter.current.fetch_add(1, Ordering::Relaxed);
        if self.lock.try_lock().is_some() {
            self.display();
        }
    }

    /// Current value of a counter.
    pub fn get(&self, name: &str) -> usize {
        self.counters
            .iter()
            .find(|c| c.name == name)
            .map_or(0, |c| c.current.load(Ordering::Relaxed))
    }

    fn render(&self) -> String {
        self.counters
            .iter()
            .map(|c| format!("{}({}/{})", c.name, c.current.load(Ordering::Relaxed), c.total))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn display(&self) {
        let mut err = stderr().lock();
        execute!(err, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
        write!(err, "{} {}", colorize_prefix(self.module), self.render()).ok();
        err.flush().ok();
    }

    /// Finish progress display, keep the final line and move below it.
    pub fn finish(self) {
        PROGRESS_ACTIVE.store(false, Ordering::SeqCst);

        let _guard = self.lock.lock();
        let mut err = stderr().lock();
        execute!(err, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
        writeln!(err, "{} {}", colorize_prefix(self.module), self.render()).ok();
        err.flush().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_skips_empty_counters() {
        let progress = ProgressLine::new(&[("chunks", 3), ("invalid", 0)]);
        assert_eq!(progress.counters.len(), 1);
        assert_eq!(progress.render(), "chunks(0/3)");
        progress.finish();
    }

    #[test]
    fn test_progress_inc() {
        let progress = ProgressLine::new(&[("chunks", 2)]);
        progress.inc("chunks");
        progress.inc("chunks");
        progress.inc("unknown");
        assert_eq!(progress.get("chunks"), 2);
        assert_eq!(progress.get("unknown"), 0);
        assert_eq!(progress.render(), "chunks(2/2)");
        progress.finish();
    }

    #[test]
    fn test_verbose_flag() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }

    #[test]
    fn test_prefix_contains_module() {
        owo_colors::set_override(false);
        assert_eq!(colorize_prefix("export"), "[export]");
    }
}
