use crate::fields::Field;

/// Errors produced while extracting run records.
#[derive(Debug)]
pub enum ExtractError {
    /// Reading the input or writing the output failed.
    Io { source: std::io::Error },
    /// A mandatory field was not found before the block ended, either at
    /// the next `Document Path` line or at the end of input.
    MalformedRecord {
        path: String,
        missing: Field,
        last_parsed: Field,
        line: u64,
    },
    /// A field matched but its value has the wrong shape.
    InvalidValue {
        field: Field,
        value: String,
        line: u64,
    },
    /// Strict mode: the line after a positive failed count was not a breakdown.
    BreakdownMismatch {
        path: String,
        found: Option<String>,
        line: u64,
    },
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::Io { source } => write!(f, "I/O error: {source}"),
            ExtractError::MalformedRecord {
                path,
                missing,
                last_parsed,
                line,
            } => write!(
                f,
                "malformed record for {path}: block ended at line {line} while looking for \
                 {missing} (last parsed field: {last_parsed})"
            ),
            ExtractError::InvalidValue { field, value, line } => {
                write!(f, "invalid {field} value {value:?} at line {line}")
            }
            ExtractError::BreakdownMismatch { path, found, line } => match found {
                Some(text) => write!(
                    f,
                    "record for {path}: expected failure breakdown at line {line}, found {text:?}"
                ),
                None => write!(
                    f,
                    "record for {path}: expected failure breakdown after line {line}, found end of input"
                ),
            },
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::Io { source } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExtractError {
    fn from(e: std::io::Error) -> Self {
        ExtractError::Io { source: e }
    }
}
