//! Human-readable rendering of run summaries and tracing setup.
//!
//! Structured observability goes through `tracing`; this module covers
//! the other half: turning a frozen [`ExecutionSummary`] into lines a
//! person can read at a terminal, with ANSI color when one is attached.

use std::io::IsTerminal;

use crate::runtimes::{ExecutionSummary, NodeStatus};

pub const CONTEXT_COLOR: &str = "\x1b[32m"; // green
pub const FAILURE_COLOR: &str = "\x1b[31m"; // red
pub const RESET_COLOR: &str = "\x1b[0m";

/// Formatter color mode for telemetry output.
///
/// - [`FormatterMode::Auto`]: detects TTY capability via `stderr.is_terminal()`
/// - [`FormatterMode::Colored`]: always include color codes
/// - [`FormatterMode::Plain`]: never include color codes (for logs/files)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatterMode {
    /// Auto-detect TTY capability.
    #[default]
    Auto,
    /// Always include ANSI color codes.
    Colored,
    /// Never include ANSI color codes.
    Plain,
}

impl FormatterMode {
    /// Returns true if this mode should use colored output.
    ///
    /// For `Auto` mode, performs TTY detection on each call.
    pub fn is_colored(&self) -> bool {
        match self {
            FormatterMode::Auto => std::io::stderr().is_terminal(),
            FormatterMode::Colored => true,
            FormatterMode::Plain => false,
        }
    }
}

/// Renders execution summaries as plain text lines.
///
/// # Examples
///
/// ```rust,no_run
/// use rowloom::telemetry::{FormatterMode, SummaryFormatter};
/// # fn example(summary: &rowloom::runtimes::ExecutionSummary) {
/// let formatter = SummaryFormatter::with_mode(FormatterMode::Plain);
/// for line in formatter.render(summary) {
///     eprintln!("{line}");
/// }
/// # }
/// ```
pub struct SummaryFormatter {
    mode: FormatterMode,
}

impl SummaryFormatter {
    /// Create a formatter with auto-detected color mode.
    pub fn new() -> Self {
        Self {
            mode: FormatterMode::Auto,
        }
    }

    /// Create a formatter with explicit color mode.
    pub fn with_mode(mode: FormatterMode) -> Self {
        Self { mode }
    }

    /// Render a summary, one line per node result plus a header and a
    /// trailing status line.
    pub fn render(&self, summary: &ExecutionSummary) -> Vec<String> {
        let colored = self.mode.is_colored();
        let mut lines = Vec::with_capacity(summary.results.len() + 2);

        lines.push(format!(
            "run {} | graph {} | {}",
            summary.run_id, summary.graph_name, summary.status
        ));

        for result in &summary.results {
            let line = format!(
                "  {} {} ({} ms){}",
                result.name,
                result.status,
                result.duration_ms,
                result
                    .error
                    .as_deref()
                    .map(|e| format!(": {e}"))
                    .unwrap_or_default()
            );
            if colored && !matches!(result.status, NodeStatus::Succeeded) {
                lines.push(format!("{FAILURE_COLOR}{line}{RESET_COLOR}"));
            } else if colored {
                lines.push(format!("{CONTEXT_COLOR}{line}{RESET_COLOR}"));
            } else {
                lines.push(line);
            }
        }

        let path = summary.execution_path.join(" -> ");
        match &summary.abort_reason {
            Some(reason) => lines.push(format!("  path: {path} | aborted: {reason}")),
            None => lines.push(format!("  path: {path}")),
        }
        lines
    }
}

impl Default for SummaryFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Install a global `tracing` subscriber driven by `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
