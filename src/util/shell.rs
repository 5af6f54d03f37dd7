//! Centralized shell output and progress management.
//!
//! The Shell module provides a unified API for operator-facing output:
//! - Status messages with consistent formatting
//! - Progress bars (via indicatif) for downloads and icon copies
//! - Scoped timing spans for the build phases
//!
//! Everything goes to stderr. Structured debug logging goes through
//! `tracing` instead; the shell is what the operator reads at the end of a run.

use std::fmt::Display;
use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// --quiet: errors only, no progress
    Quiet,
    /// Default: status messages + progress bars
    #[default]
    Normal,
    /// --verbose: status messages, per-item lines instead of progress bars
    Verbose,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    #[default]
    Auto,
    /// Always use ANSI colors.
    Always,
    /// Never use ANSI colors.
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

/// Status types for output messages.
///
/// Shell handles all formatting - callers just specify the semantic status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // Success statuses (green)
    Finished,
    Removed,

    // In-progress statuses (cyan)
    Fetching,
    Extracting,
    Building,
    Resolving,

    // Info statuses (blue/default)
    Info,

    // Warning statuses (yellow)
    Skipped,
    Missing,
    Warning,

    // Error status (red)
    Error,
}

impl Status {
    /// Get the display text for this status.
    fn as_str(&self) -> &'static str {
        match self {
            Status::Finished => "Finished",
            Status::Removed => "Removed",
            Status::Fetching => "Fetching",
            Status::Extracting => "Extracting",
            Status::Building => "Building",
            Status::Resolving => "Resolving",
            Status::Info => "Info",
            Status::Skipped => "Skipped",
            Status::Missing => "Missing",
            Status::Warning => "Warning",
            Status::Error => "error",
        }
    }

    /// Get the ANSI color code for this status.
    fn color_code(&self) -> &'static str {
        match self {
            Status::Finished | Status::Removed => "\x1b[1;32m",
            Status::Fetching | Status::Extracting | Status::Building | Status::Resolving => {
                "\x1b[1;36m"
            }
            Status::Info => "\x1b[1;34m",
            Status::Skipped | Status::Missing | Status::Warning => "\x1b[1;33m",
            Status::Error => "\x1b[1;31m",
        }
    }

    /// Get the width for alignment (12 characters).
    fn width(&self) -> usize {
        12
    }
}

/// Central shell for all operator output.
#[derive(Debug)]
pub struct Shell {
    verbosity: Verbosity,
    use_color: bool,
}

impl Shell {
    /// Create a new shell.
    pub fn new(verbosity: Verbosity, color: ColorChoice) -> Self {
        let use_color = match color {
            ColorChoice::Auto => io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        };

        Shell {
            verbosity,
            use_color,
        }
    }

    /// Create a shell from CLI flags. Quiet wins over verbose.
    pub fn from_flags(quiet: bool, verbose: bool, color: ColorChoice) -> Self {
        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        Shell::new(verbosity, color)
    }

    /// Check if shell is in quiet mode.
    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    /// Check if shell is in verbose mode.
    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    /// Check if colors are enabled.
    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Print a status message.
    ///
    /// Format: `{status:>12} {message}`
    ///
    /// In quiet mode, only Error status is printed.
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.is_quiet() && status != Status::Error {
            return;
        }

        let prefix = self.format_status(status);
        eprintln!("{} {}", prefix, msg);
    }

    /// Print an indented detail line under the previous status.
    pub fn detail(&self, msg: impl Display) {
        if self.is_quiet() {
            return;
        }
        eprintln!("{:width$} {}", "", msg, width = 12);
    }

    /// Format a status prefix with optional color.
    fn format_status(&self, status: Status) -> String {
        let text = status.as_str();
        let width = status.width();

        if self.use_color {
            let color = status.color_code();
            format!("{}{:>width$}\x1b[0m", color, text, width = width)
        } else {
            format!("{:>width$}", text, width = width)
        }
    }

    /// Create a scoped span for timing a phase.
    pub fn span(self: &Arc<Self>, status: Status, msg: impl Display) -> Span {
        Span::new(Arc::clone(self), status, msg.to_string())
    }

    /// Create an item-count progress bar.
    ///
    /// In quiet or verbose mode, returns a progress without a bar.
    pub fn progress(self: &Arc<Self>, total: u64, msg: impl Display) -> Progress {
        Progress::new(Arc::clone(self), total, msg.to_string(), false)
    }

    /// Create a byte-based progress bar for downloads.
    pub fn bytes_progress(self: &Arc<Self>, msg: impl Display, total_bytes: u64) -> Progress {
        Progress::new(Arc::clone(self), total_bytes, msg.to_string(), true)
    }
}

impl Default for Shell {
    fn default() -> Self {
        Shell::new(Verbosity::Normal, ColorChoice::Auto)
    }
}

/// A timed phase. The start line is printed immediately and the end line
/// with the elapsed time when the span is finished. A span dropped without
/// being finished (an error unwound through it) ends with an error line.
pub struct Span {
    shell: Arc<Shell>,
    label: String,
    start: Instant,
    finished: bool,
}

impl Span {
    fn new(shell: Arc<Shell>, status: Status, message: String) -> Self {
        shell.status(status, &message);
        Span {
            shell,
            label: message,
            start: Instant::now(),
            finished: false,
        }
    }

    /// Mark the span as finished with a custom message.
    pub fn finish_with_message(mut self, msg: impl Display) {
        self.finished = true;
        let duration_str = format_duration(self.start.elapsed());
        self.shell
            .status(Status::Finished, format!("{} in {}", msg, duration_str));
    }

    /// End line of a span that was never finished.
    fn aborted_line(&self) -> (Status, String) {
        let duration_str = format_duration(self.start.elapsed());
        (
            Status::Error,
            format!("{} aborted after {}", self.label, duration_str),
        )
    }
}

impl Drop for Span {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let (status, line) = self.aborted_line();
        self.shell.status(status, line);
    }
}

/// Progress bar wrapper that respects shell verbosity.
pub struct Progress {
    shell: Arc<Shell>,
    pb: Option<ProgressBar>,
    total: u64,
    current: u64,
    message: String,
}

impl Progress {
    fn new(shell: Arc<Shell>, total: u64, message: String, is_bytes: bool) -> Self {
        let pb = if shell.is_quiet() || shell.is_verbose() {
            None
        } else if total > 1 {
            let pb = ProgressBar::new(total);
            let template = if is_bytes {
                "{spinner:.green} {msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes}"
            } else {
                "{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}"
            };
            if let Ok(style) = ProgressStyle::default_bar().template(template) {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb.set_message(message.clone());
            Some(pb)
        } else {
            None
        };

        Progress {
            shell,
            pb,
            total,
            current: 0,
            message,
        }
    }

    /// Advance the progress by `delta`.
    pub fn inc(&mut self, delta: u64) {
        self.current += delta;

        if let Some(pb) = &self.pb {
            pb.inc(delta);
        }
    }

    /// Advance by one item, printing `item` as a raw line in verbose mode.
    pub fn tick(&mut self, item: impl Display) {
        self.inc(1);
        if self.shell.is_verbose() {
            eprintln!("  {} [{}/{}] {}", self.message, self.current, self.total, item);
        }
    }

    /// Finish the progress bar.
    pub fn finish(&self) {
        if let Some(pb) = &self.pb {
            pb.finish_and_clear();
        }
    }

    /// Get the current position.
    pub fn position(&self) -> u64 {
        self.current
    }

    /// Get the total.
    pub fn total(&self) -> u64 {
        self.total
    }
}

/// Format a duration in a human-readable way.
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        format!("{:.1}m", secs / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_choice_parse() {
        assert_eq!("auto".parse::<ColorChoice>().unwrap(), ColorChoice::Auto);
        assert_eq!("always".parse::<ColorChoice>().unwrap(), ColorChoice::Always);
        assert_eq!("never".parse::<ColorChoice>().unwrap(), ColorChoice::Never);
        assert!("invalid".parse::<ColorChoice>().is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "0.50s");
        assert_eq!(format_duration(Duration::from_secs(2)), "2.00s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1.5m");
    }

    #[test]
    fn test_status_formatting() {
        let shell = Shell::new(Verbosity::Normal, ColorChoice::Never);

        let formatted = shell.format_status(Status::Extracting);
        assert_eq!(formatted.trim(), "Extracting");
        assert_eq!(formatted.len(), 12);
    }

    #[test]
    fn test_unfinished_span_ends_with_error() {
        let shell = Arc::new(Shell::new(Verbosity::Quiet, ColorChoice::Never));
        let span = shell.span(Status::Fetching, "3 archives");

        let (status, line) = span.aborted_line();
        assert_eq!(status, Status::Error);
        assert!(line.starts_with("3 archives aborted after "));
        assert!(!line.contains("Finished"));
        span.finish_with_message("3 archives");
    }

    #[test]
    fn test_from_flags() {
        let shell = Shell::from_flags(false, false, ColorChoice::Never);
        assert!(!shell.is_quiet());
        assert!(!shell.is_verbose());
        assert!(!shell.use_color());

        let shell = Shell::from_flags(true, true, ColorChoice::Never);
        assert!(shell.is_quiet());

        let shell = Shell::from_flags(false, true, ColorChoice::Always);
        assert!(shell.is_verbose());
        assert!(shell.use_color());
    }

    #[test]
    fn test_progress_counts_without_bar() {
        let shell = Arc::new(Shell::new(Verbosity::Quiet, ColorChoice::Never));
        let mut progress = shell.progress(3, "Copying icons");
        progress.tick("a.png");
        progress.inc(2);
        progress.finish();
        assert_eq!(progress.position(), 3);
        assert_eq!(progress.total(), 3);
    }
}
