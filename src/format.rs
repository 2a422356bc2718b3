/// Delimited row rendering.
use crate::config::OutputConfig;
use crate::record::RunRecord;

/// Column names, in output order.
pub const COLUMNS: [&str; 14] = [
    "path", "users", "requests", "failed", "err_conn", "err_rcv", "err_len", "err_ex", "non2xx",
    "rps", "mean", "50", "90", "99",
];

/// Renders run records as delimited rows.
///
/// Every cell has each `.` replaced by the decimal separator, whatever the
/// column's type. `header` says whether a header row precedes the data.
#[derive(Debug, Clone)]
pub struct RowFormatter {
    delimiter: String,
    decimal_separator: char,
    header: bool,
}

impl Default for RowFormatter {
    fn default() -> Self {
        Self::new(";", ',')
    }
}

impl RowFormatter {
    pub fn new(delimiter: impl Into<String>, decimal_separator: char) -> Self {
        Self {
            delimiter: delimiter.into(),
            decimal_separator,
            header: true,
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.delimiter.clone(), config.decimal_separator).with_header(config.header)
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// The header row, or `None` when it is switched off.
    pub fn header_row(&self) -> Option<String> {
        self.header.then(|| self.column_names())
    }

    fn column_names(&self) -> String {
        self.join(COLUMNS.iter().map(|c| c.to_string()))
    }

    pub fn format(&self, record: &RunRecord) -> String {
        let cells = [
            record.path.clone(),
            record.concurrency_level.to_string(),
            record.complete_requests.to_string(),
            record.failed_requests.to_string(),
            record.errors.connect.to_string(),
            record.errors.receive.to_string(),
            record.errors.length.to_string(),
            record.errors.exceptions.to_string(),
            record.non_2xx_responses.to_string(),
            record.requests_per_second.to_string(),
            record.mean_time_per_request.to_string(),
            record.p50.to_string(),
            record.p90.to_string(),
            record.p99.to_string(),
        ];
        self.join(cells.into_iter())
    }

    fn join(&self, cells: impl Iterator<Item = String>) -> String {
        let separator = self.decimal_separator.to_string();
        cells
            .map(|cell| cell.replace('.', &separator))
            .collect::<Vec<_>>()
            .join(&self.delimiter)
    }
}
