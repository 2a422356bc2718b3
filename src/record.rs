use crate::breakdown::ErrorBreakdown;

/// One benchmark run, as reported by a single block of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub path: String,
    pub concurrency_level: u64,
    pub complete_requests: u64,
    pub failed_requests: u64,
    pub errors: ErrorBreakdown,
    pub non_2xx_responses: u64,
    pub requests_per_second: Decimal,
    pub mean_time_per_request: Decimal,
    pub p50: u64,
    pub p90: u64,
    pub p99: u64,
}

/// A decimal number that keeps the exact text it was read from.
///
/// Rows must reproduce the source value digit for digit, so the text is
/// stored verbatim and only validated on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Decimal {
    raw: String,
    value: f64,
}

impl Decimal {
    /// Parse digits with at most one `.` or `,` separator.
    pub fn parse(raw: &str) -> Option<Self> {
        let digits = raw.chars().filter(|c| c.is_ascii_digit()).count();
        let separators = raw.chars().filter(|c| matches!(c, '.' | ',')).count();
        if digits == 0 || separators > 1 || digits + separators != raw.chars().count() {
            return None;
        }
        let value = raw.replace(',', ".").parse::<f64>().ok()?;
        Some(Self {
            raw: raw.to_string(),
            value,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Display for Decimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
