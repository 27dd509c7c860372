use std::io::{self, Stderr, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use crate::pretty::pretty_count;

/// Label used when a timer is created without one.
pub const DEFAULT_LABEL: &str = "some function/code";

/// A shared on/off switch for timer output.
///
/// Clones share the same cell. Once silenced, a cell stays silenced.
/// `Silence::global()` is the process-wide cell used by `Timer::new`;
/// `Silence::new()` gives an independent cell (used by tests).
#[derive(Debug, Clone, Default)]
pub struct Silence(Arc<AtomicBool>);

impl Silence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global() -> Self {
        static GLOBAL: OnceLock<Silence> = OnceLock::new();
        GLOBAL.get_or_init(Silence::new).clone()
    }

    pub fn silence(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_silent(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Scoped elapsed-time reporter.
///
/// Starts timing on construction. On drop it stops (if still running) and
/// prints one line of the form
///
/// ```text
/// 12,345 microseconds spent in program unit 'label'
/// ```
///
/// to its sink (stderr unless constructed with [`Timer::with_sink`]),
/// unless its silence cell is set.
///
/// `print` reports `stop - start` and does not stop a running timer. Calling
/// it before any `stop` gives a meaningless value: 0 on a fresh timer, and
/// 0 after a `start` that has no matching `stop` yet.
pub struct Timer<W: Write = Stderr> {
    label: String,
    start: Instant,
    stop: Instant,
    running: bool,
    silence: Silence,
    sink: W,
}

impl Timer<Stderr> {
    pub fn new(label: impl Into<String>) -> Self {
        Timer::with_sink(label, Silence::global(), io::stderr())
    }

    /// Silence every timer that reports through the process-wide cell,
    /// existing and future. There is no way to undo this.
    pub fn silence() {
        Silence::global().silence();
    }
}

impl Default for Timer<Stderr> {
    fn default() -> Self {
        Timer::new(DEFAULT_LABEL)
    }
}

impl<W: Write> Timer<W> {
    pub fn with_sink(label: impl Into<String>, silence: Silence, sink: W) -> Self {
        let now = Instant::now();
        let mut timer = Timer {
            label: label.into(),
            start: now,
            stop: now,
            running: false,
            silence,
            sink,
        };
        timer.start();
        timer
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) -> &mut Self {
        self.start = Instant::now();
        self.running = true;
        self
    }

    /// No-op when already stopped.
    pub fn stop(&mut self) -> &mut Self {
        if self.running {
            self.stop = Instant::now();
            self.running = false;
        }
        self
    }

    /// Zero the window (`start == stop == now`) and mark the timer stopped.
    pub fn reset(&mut self) -> &mut Self {
        let now = Instant::now();
        self.start = now;
        self.stop = now;
        self.running = false;
        self
    }

    /// The last measured window, `stop - start`.
    pub fn elapsed(&self) -> Duration {
        self.stop.saturating_duration_since(self.start)
    }

    pub fn elapsed_micros(&self) -> u64 {
        u64::try_from(self.elapsed().as_micros()).unwrap_or(u64::MAX)
    }

    /// The line `print` writes, without the trailing newline.
    pub fn report(&self) -> String {
        format!(
            "{} microseconds spent in program unit '{}'",
            pretty_count(self.elapsed_micros()),
            self.label
        )
    }

    pub fn print(&mut self) -> &mut Self {
        if !self.silence.is_silent() {
            let line = self.report();
            // A failed diagnostic write must not disturb the timed program.
            let _ = writeln!(self.sink, "{}", line);
        }
        self
    }

    pub fn reset_and_print(&mut self) -> &mut Self {
        self.print();
        self.reset()
    }
}

impl<W: Write> Drop for Timer<W> {
    fn drop(&mut self) {
        self.stop();
        self.print();
    }
}
