/// Streaming driver: read blocks, write one row per completed record.
use crate::assemble::{Records, Strictness};
use crate::error::ExtractError;
use crate::format::RowFormatter;
use crate::lines::LineSource;
use std::io::{BufRead, Write};

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub records: u64,
    pub warnings: u64,
}

/// Write the header and then a row per record as soon as it is complete.
///
/// Stops at the first error. Rows written before it are flushed and kept.
pub fn extract<R: BufRead, W: Write>(
    source: LineSource<R>,
    formatter: &RowFormatter,
    strictness: Strictness,
    out: &mut W,
) -> Result<Summary, ExtractError> {
    let result = write_rows(source, formatter, strictness, out);
    out.flush()?;
    result
}

fn write_rows<R: BufRead, W: Write>(
    source: LineSource<R>,
    formatter: &RowFormatter,
    strictness: Strictness,
    out: &mut W,
) -> Result<Summary, ExtractError> {
    if let Some(header) = formatter.header_row() {
        writeln!(out, "{header}")?;
    }

    let mut records = Records::new(source, strictness);
    let mut summary = Summary::default();
    for record in records.by_ref() {
        let record = record?;
        writeln!(out, "{}", formatter.format(&record))?;
        summary.records += 1;
    }
    summary.warnings = records.warnings();
    Ok(summary)
}
