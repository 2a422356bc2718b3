/// Record assembly: turns a stream of report lines into run records.
///
/// Each record starts at a `Document Path` line. From there the remaining
/// fields are pulled strictly forward, in report order:
///
/// 1. concurrency level, complete requests, failed requests (mandatory)
/// 2. the failure breakdown line, only when failed requests > 0
/// 3. non-2xx responses, searched only up to the `Total transferred` line
///    (or `Requests per second`, whichever comes first)
/// 4. requests per second, mean time per request, 50/90/99% (mandatory)
///
/// Running out of input while looking for a `Document Path` ends the sequence
/// normally. Running out anywhere later, or meeting the next block's
/// `Document Path` before every mandatory field is found, is a malformed record.
use crate::breakdown::{decompose, ErrorBreakdown};
use crate::error::ExtractError;
use crate::fields::{self, Field, FieldSpec, Window};
use crate::lines::LineSource;
use crate::record::{Decimal, RunRecord};
use std::io::BufRead;
use std::iter::FusedIterator;
use tracing::{debug, warn};

/// How to treat a failure breakdown line that cannot be decomposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Default the four counters to zero and log a warning.
    #[default]
    Lenient,
    /// Fail the record.
    Strict,
}

/// Lazily yields one [`RunRecord`] per report block.
///
/// Single-use: consuming records advances the underlying source. After the
/// first error or the end of input, the iterator yields `None` forever.
pub struct Records<R> {
    source: LineSource<R>,
    strictness: Strictness,
    warnings: u64,
    done: bool,
}

/// Progress through the block currently being assembled.
struct Block {
    path: String,
    last_parsed: Field,
}

impl<R: BufRead> Records<R> {
    pub fn new(source: LineSource<R>, strictness: Strictness) -> Self {
        Self {
            source,
            strictness,
            warnings: 0,
            done: false,
        }
    }

    /// Number of defaulting warnings raised so far.
    pub fn warnings(&self) -> u64 {
        self.warnings
    }

    fn next_record(&mut self) -> Result<Option<RunRecord>, ExtractError> {
        let Some(path) = fields::scan(&mut self.source, &fields::DOCUMENT_PATH)? else {
            debug!(line = self.source.line_number(), "no further document path, input exhausted");
            return Ok(None);
        };
        let mut block = Block {
            path,
            last_parsed: Field::DocumentPath,
        };

        let concurrency_level = self.integer(&mut block, &fields::CONCURRENCY_LEVEL)?;
        let complete_requests = self.integer(&mut block, &fields::COMPLETE_REQUESTS)?;
        let failed_requests = self.integer(&mut block, &fields::FAILED_REQUESTS)?;

        let errors = if failed_requests > 0 {
            self.error_breakdown(&mut block)?
        } else {
            ErrorBreakdown::default()
        };

        let (non_2xx_responses, carried_rate) = self.non_2xx_responses(&mut block)?;

        let requests_per_second = match carried_rate {
            Some(raw) => self.parse_decimal(Field::RequestsPerSecond, raw)?,
            None => self.decimal(&mut block, &fields::REQUESTS_PER_SECOND)?,
        };
        let mean_time_per_request = self.decimal(&mut block, &fields::TIME_PER_REQUEST)?;
        let p50 = self.integer(&mut block, &fields::PERCENTILE_50)?;
        let p90 = self.integer(&mut block, &fields::PERCENTILE_90)?;
        let p99 = self.integer(&mut block, &fields::PERCENTILE_99)?;

        debug!(
            path = %block.path,
            line = self.source.line_number(),
            rps = requests_per_second.value(),
            failed_requests,
            "record complete"
        );

        Ok(Some(RunRecord {
            path: block.path,
            concurrency_level,
            complete_requests,
            failed_requests,
            errors,
            non_2xx_responses,
            requests_per_second,
            mean_time_per_request,
            p50,
            p90,
            p99,
        }))
    }

    /// Scan for `spec` without crossing into the next block.
    fn mandatory(&mut self, block: &mut Block, spec: &FieldSpec) -> Result<String, ExtractError> {
        match fields::scan_window(&mut self.source, spec, &[&*fields::DOCUMENT_PATH])? {
            Window::Found(value) => {
                block.last_parsed = spec.field;
                Ok(value)
            }
            Window::Terminated { .. } | Window::Exhausted => Err(self.malformed(block, spec.field)),
        }
    }

    fn malformed(&self, block: &Block, missing: Field) -> ExtractError {
        ExtractError::MalformedRecord {
            path: block.path.clone(),
            missing,
            last_parsed: block.last_parsed,
            line: self.source.line_number(),
        }
    }

    fn integer(&mut self, block: &mut Block, spec: &FieldSpec) -> Result<u64, ExtractError> {
        let raw = self.mandatory(block, spec)?;
        self.parse_integer(spec.field, raw)
    }

    fn decimal(&mut self, block: &mut Block, spec: &FieldSpec) -> Result<Decimal, ExtractError> {
        let raw = self.mandatory(block, spec)?;
        self.parse_decimal(spec.field, raw)
    }

    fn parse_decimal(&self, field: Field, raw: String) -> Result<Decimal, ExtractError> {
        Decimal::parse(&raw).ok_or_else(|| ExtractError::InvalidValue {
            field,
            value: raw,
            line: self.source.line_number(),
        })
    }

    fn parse_integer(&self, field: Field, raw: String) -> Result<u64, ExtractError> {
        raw.parse::<u64>().map_err(|_| ExtractError::InvalidValue {
            field,
            value: raw,
            line: self.source.line_number(),
        })
    }

    /// Read exactly one line and split it into the four failure counters.
    fn error_breakdown(&mut self, block: &mut Block) -> Result<ErrorBreakdown, ExtractError> {
        let line = self.source.next_line()?.map(str::to_string);
        if line
            .as_deref()
            .is_some_and(|l| fields::DOCUMENT_PATH.capture(l).is_some())
        {
            return Err(self.malformed(block, Field::ErrorBreakdown));
        }
        let decomposed = decompose(line.as_deref());

        let Some(warning) = decomposed.warning else {
            block.last_parsed = Field::ErrorBreakdown;
            return Ok(decomposed.value);
        };

        match self.strictness {
            Strictness::Strict => Err(ExtractError::BreakdownMismatch {
                path: block.path.clone(),
                found: line,
                line: self.source.line_number(),
            }),
            Strictness::Lenient => {
                self.warnings += 1;
                warn!(
                    path = %block.path,
                    line = self.source.line_number(),
                    "{warning}; failure counters reported as zero"
                );
                Ok(decomposed.value)
            }
        }
    }

    /// Bounded search for the optional non-2xx count.
    ///
    /// The window closes at `Total transferred`, or at `Requests per second`
    /// when a report omits the transfer totals. In the latter case the
    /// consumed rate is returned alongside so it is not scanned for again.
    /// Reaching the next `Document Path` means this block lost its rates.
    fn non_2xx_responses(
        &mut self,
        block: &mut Block,
    ) -> Result<(u64, Option<String>), ExtractError> {
        let window = fields::scan_window(
            &mut self.source,
            &fields::NON_2XX_RESPONSES,
            &[
                &*fields::TOTAL_TRANSFERRED,
                &*fields::REQUESTS_PER_SECOND,
                &*fields::DOCUMENT_PATH,
            ],
        )?;
        match window {
            Window::Terminated {
                field: Field::DocumentPath,
                ..
            } => Err(self.malformed(block, Field::RequestsPerSecond)),
            Window::Found(raw) => {
                block.last_parsed = Field::Non2xxResponses;
                Ok((self.parse_integer(Field::Non2xxResponses, raw)?, None))
            }
            Window::Terminated { field, value } => {
                block.last_parsed = field;
                let carried = (field == Field::RequestsPerSecond).then_some(value);
                Ok((0, carried))
            }
            Window::Exhausted => Ok((0, None)),
        }
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<RunRecord, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> FusedIterator for Records<R> {}
