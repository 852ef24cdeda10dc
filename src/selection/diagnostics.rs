//! selection::diagnostics — injectable, level-filtered diagnostic output.
//!
//! Purpose
//! -------
//! Give the search algorithms a way to report their progress (candidate
//! values, committed indices, intermediate matrices) without a process-wide
//! logger. Each algorithm holds an `Arc<dyn DiagnosticSink>`; the default is
//! [`Silent`], which reports every level as disabled so the hot loops never
//! format anything.
//!
//! Key behaviors
//! -------------
//! - [`DiagnosticSink::enabled`] is checked before any formatting work
//!   (the crate-internal `diag!` macro does this for every call site).
//! - [`LogSink`] forwards to the `log` facade under a fixed target, so the
//!   host application's logger (e.g. `env_logger`) decides what is shown.
//! - `print_indices` / `print_matrix` render index sets and small matrices
//!   at a given level.
//!
//! Conventions
//! -------------
//! - Levels are `log::Level`; matrix dumps are emitted at `Trace`, per-step
//!   progress at `Debug`.
//! - Sinks are `Send + Sync` so they can be shared with rayon workers.
use log::Level;
use ndarray::ArrayView2;
use std::fmt;
use std::sync::Arc;

/// Destination for diagnostic output of the selection algorithms.
pub trait DiagnosticSink: Send + Sync + fmt::Debug {
    /// Whether messages at `level` would be recorded.
    fn enabled(&self, level: Level) -> bool;

    /// Record one pre-formatted message.
    fn write(&self, level: Level, args: fmt::Arguments<'_>);

    /// Render an index set as `label = [i0, i1, …]`.
    fn print_indices(&self, level: Level, label: &str, indices: &[usize]) {
        if self.enabled(level) {
            self.write(level, format_args!("{label} = {indices:?}"));
        }
    }

    /// Render a matrix row by row under a `label (r×c)` header.
    fn print_matrix(&self, level: Level, label: &str, m: ArrayView2<'_, f64>) {
        if !self.enabled(level) {
            return;
        }
        self.write(level, format_args!("{label} ({}x{})", m.nrows(), m.ncols()));
        for row in m.rows() {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:.6}")).collect();
            self.write(level, format_args!("  [{}]", cells.join(", ")));
        }
    }
}

/// No-op sink; every level is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl DiagnosticSink for Silent {
    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn write(&self, _level: Level, _args: fmt::Arguments<'_>) {}
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct LogSink {
    target: &'static str,
}

impl LogSink {
    /// Log under `target` (the `log` record target used for filtering).
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new("rust_feature_selection")
    }
}

impl DiagnosticSink for LogSink {
    fn enabled(&self, level: Level) -> bool {
        log::log_enabled!(target: self.target, level)
    }

    fn write(&self, level: Level, args: fmt::Arguments<'_>) {
        log::log!(target: self.target, level, "{args}");
    }
}

/// Shared handle to the default [`Silent`] sink.
pub fn silent() -> Arc<dyn DiagnosticSink> {
    Arc::new(Silent)
}

/// Emit a formatted message only when the sink has `level` enabled.
macro_rules! diag {
    ($sink:expr, $level:expr, $($arg:tt)+) => {{
        let sink = &$sink;
        if sink.enabled($level) {
            sink.write($level, format_args!($($arg)+));
        }
    }};
}

pub(crate) use diag;
