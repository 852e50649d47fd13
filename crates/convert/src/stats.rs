use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;

use pipeline::{ParseError, PipelineError};

/// Why a line ended up in the problems sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No candidate format accepted the line
    NoMatch,
    /// The line parsed but could not be transformed
    Transform,
    /// The transformed entry could not be rendered
    Render,
    InvalidArgument,
    /// The line was not valid UTF-8
    NonUtf8,
}

impl FailureKind {
    pub fn of(err: &PipelineError) -> Self {
        match err {
            PipelineError::Parse(ParseError::NoFormatMatched(_)) => FailureKind::NoMatch,
            PipelineError::Parse(ParseError::InvalidArgument(_)) => FailureKind::InvalidArgument,
            PipelineError::Transform(_) => FailureKind::Transform,
            PipelineError::Render(_) => FailureKind::Render,
        }
    }
}

#[derive(Debug, Default)]
struct Failures {
    no_match: AtomicU64,
    transform: AtomicU64,
    render: AtomicU64,
    invalid_argument: AtomicU64,
    non_utf8: AtomicU64,
}

/// Counters for one conversion run.
///
/// All operations use `Ordering::Relaxed`; a snapshot taken while lines are
/// still being recorded may be slightly out of step across fields.
#[derive(Debug)]
pub struct RunStats {
    started: Instant,
    lines_read: AtomicU64,
    converted: AtomicU64,
    empty_lines: AtomicU64,
    failures: Failures,
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            lines_read: AtomicU64::new(0),
            converted: AtomicU64::new(0),
            empty_lines: AtomicU64::new(0),
            failures: Failures::default(),
        }
    }

    #[inline]
    pub fn record_read(&self) {
        self.lines_read.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_converted(&self) {
        self.converted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_empty(&self) {
        self.empty_lines.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_failure(&self, kind: FailureKind) {
        let counter = match kind {
            FailureKind::NoMatch => &self.failures.no_match,
            FailureKind::Transform => &self.failures.transform,
            FailureKind::Render => &self.failures.render,
            FailureKind::InvalidArgument => &self.failures.invalid_argument,
            FailureKind::NonUtf8 => &self.failures.non_utf8,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let lines_read = self.lines_read.load(Ordering::Relaxed);
        let converted = self.converted.load(Ordering::Relaxed);
        let empty_lines = self.empty_lines.load(Ordering::Relaxed);

        let no_match = self.failures.no_match.load(Ordering::Relaxed);
        let transform_failures = self.failures.transform.load(Ordering::Relaxed);
        let render_failures = self.failures.render.load(Ordering::Relaxed);
        let invalid_argument = self.failures.invalid_argument.load(Ordering::Relaxed);
        let non_utf8 = self.failures.non_utf8.load(Ordering::Relaxed);
        let problems = no_match + transform_failures + render_failures + invalid_argument + non_utf8;

        let attempted = converted + problems;
        let success_rate = if attempted > 0 {
            converted as f64 / attempted as f64
        } else {
            0.0
        };

        StatsSnapshot {
            lines_read,
            converted,
            problems,
            empty_lines,
            no_match,
            transform_failures,
            render_failures,
            invalid_argument,
            non_utf8,
            elapsed_ms: self.elapsed().as_millis() as u64,
            success_rate,
        }
    }
}

/// Serializable view of [`RunStats`] for logging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub lines_read: u64,
    pub converted: u64,
    pub problems: u64,
    pub empty_lines: u64,
    pub no_match: u64,
    pub transform_failures: u64,
    pub render_failures: u64,
    pub invalid_argument: u64,
    pub non_utf8: u64,
    pub elapsed_ms: u64,
    /// Converted lines over non-empty lines, 0.0 when nothing was attempted.
    pub success_rate: f64,
}
