/// Labeled field recognition and forward scanning.
///
/// Every field of a run report is recognised by a full-line pattern with one
/// capture group. The table is compiled once and shared read-only.
use crate::lines::LineSource;
use regex::Regex;
use std::io::BufRead;
use std::sync::LazyLock;

/// Fields of a single report block, in the order they appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    DocumentPath,
    ConcurrencyLevel,
    CompleteRequests,
    FailedRequests,
    ErrorBreakdown,
    Non2xxResponses,
    TotalTransferred,
    RequestsPerSecond,
    TimePerRequest,
    Percentile50,
    Percentile90,
    Percentile99,
}

impl Field {
    /// Human-readable name used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Field::DocumentPath => "Document Path",
            Field::ConcurrencyLevel => "Concurrency Level",
            Field::CompleteRequests => "Complete requests",
            Field::FailedRequests => "Failed requests",
            Field::ErrorBreakdown => "failure breakdown",
            Field::Non2xxResponses => "Non-2xx responses",
            Field::TotalTransferred => "Total transferred",
            Field::RequestsPerSecond => "Requests per second",
            Field::TimePerRequest => "Time per request",
            Field::Percentile50 => "50th percentile",
            Field::Percentile90 => "90th percentile",
            Field::Percentile99 => "99th percentile",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// An immutable extraction rule: a field and the pattern that recognises it.
#[derive(Debug)]
pub struct FieldSpec {
    pub field: Field,
    pattern: Regex,
}

impl FieldSpec {
    fn new(field: Field, pattern: &str) -> Self {
        Self {
            field,
            pattern: Regex::new(pattern).unwrap(),
        }
    }

    /// First capture group of `line`, if the whole line matches.
    pub fn capture<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

macro_rules! field_spec {
    ($name:ident, $field:expr, $pattern:expr) => {
        pub static $name: LazyLock<FieldSpec> = LazyLock::new(|| FieldSpec::new($field, $pattern));
    };
}

field_spec!(DOCUMENT_PATH, Field::DocumentPath, r"^Document Path:\s*(\S+)\s*$");
field_spec!(CONCURRENCY_LEVEL, Field::ConcurrencyLevel, r"^Concurrency Level:\s*(\S+)\s*$");
field_spec!(COMPLETE_REQUESTS, Field::CompleteRequests, r"^Complete requests:\s*(\S+)\s*$");
field_spec!(FAILED_REQUESTS, Field::FailedRequests, r"^Failed requests:\s*(\S+)\s*$");
field_spec!(NON_2XX_RESPONSES, Field::Non2xxResponses, r"^Non-2xx responses:\s*(\d+)\s*$");
field_spec!(TOTAL_TRANSFERRED, Field::TotalTransferred, r"^Total transferred:\s*(\d+).*$");
field_spec!(REQUESTS_PER_SECOND, Field::RequestsPerSecond, r"^Requests per second:\s*([\d,.]+).*$");
field_spec!(TIME_PER_REQUEST, Field::TimePerRequest, r"^Time per request:\s*([\d,.]+).*$");
field_spec!(PERCENTILE_50, Field::Percentile50, r"^\s*50%\s*(\d+).*$");
field_spec!(PERCENTILE_90, Field::Percentile90, r"^\s*90%\s*(\d+).*$");
field_spec!(PERCENTILE_99, Field::Percentile99, r"^\s*99%\s*(\d+).*$");

/// Outcome of a bounded-window scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Window {
    /// The field matched before the terminal marker.
    Found(String),
    /// A terminal marker line was reached (and consumed) first. Its own
    /// capture is handed back so the caller does not lose it.
    Terminated { field: Field, value: String },
    /// The stream ended before either matched.
    Exhausted,
}

/// Advance until a line matches `spec`; return its captured value.
///
/// Returns `Ok(None)` with the cursor at end-of-stream when nothing matches.
pub fn scan<R: BufRead>(
    source: &mut LineSource<R>,
    spec: &FieldSpec,
) -> std::io::Result<Option<String>> {
    while let Some(line) = source.next_line()? {
        if let Some(value) = spec.capture(line) {
            let value = value.to_string();
            tracing::trace!(
                field = %spec.field,
                %value,
                line = source.line_number(),
                "field matched"
            );
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// Like [`scan`], but give up as soon as a line matches one of `terminals`.
pub fn scan_window<R: BufRead>(
    source: &mut LineSource<R>,
    spec: &FieldSpec,
    terminals: &[&FieldSpec],
) -> std::io::Result<Window> {
    while let Some(line) = source.next_line()? {
        if let Some(value) = spec.capture(line) {
            return Ok(Window::Found(value.to_string()));
        }
        for terminal in terminals {
            if let Some(value) = terminal.capture(line) {
                return Ok(Window::Terminated {
                    field: terminal.field,
                    value: value.to_string(),
                });
            }
        }
    }
    Ok(Window::Exhausted)
}
