/// Failure breakdown decomposition.
///
/// When a run reports failed requests, the very next line splits them into
/// connect, receive, length and exception failures:
///
/// ```text
/// Failed requests:        5
///    (Connect: 1, Receive: 2, Length: 3, Exceptions: 4)
/// ```
///
/// A line that does not have this shape decomposes to all zeros. The loss is
/// reported through [`Defaulted::warning`] so callers decide how strict to be.
use regex::Regex;
use std::sync::LazyLock;

static BREAKDOWN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*\(Connect:\s*(\d+),\s*Receive:\s*(\d+),\s*Length:\s*(\d+),\s*Exceptions:\s*(\d+).*$",
    )
    .unwrap()
});

/// The four failure counters, in report order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorBreakdown {
    pub connect: u64,
    pub receive: u64,
    pub length: u64,
    pub exceptions: u64,
}

/// Why a value was replaced by its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The line after a positive failed count was not a breakdown.
    BreakdownMismatch { line: String },
    /// The stream ended right after a positive failed count.
    BreakdownMissing,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::BreakdownMismatch { line } => {
                write!(f, "expected failure breakdown, found {line:?}")
            }
            Warning::BreakdownMissing => {
                write!(f, "expected failure breakdown, found end of input")
            }
        }
    }
}

/// A value that may have been defaulted, with the reason if so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaulted<T> {
    pub value: T,
    pub warning: Option<Warning>,
}

impl<T> Defaulted<T> {
    fn exact(value: T) -> Self {
        Self {
            value,
            warning: None,
        }
    }

    fn fallback(value: T, warning: Warning) -> Self {
        Self {
            value,
            warning: Some(warning),
        }
    }
}

/// Split a breakdown line into its four counters.
///
/// `None` means there was no line to read.
pub fn decompose(line: Option<&str>) -> Defaulted<ErrorBreakdown> {
    let Some(line) = line else {
        return Defaulted::fallback(ErrorBreakdown::default(), Warning::BreakdownMissing);
    };

    match parse_line(line) {
        Some(breakdown) => Defaulted::exact(breakdown),
        None => Defaulted::fallback(
            ErrorBreakdown::default(),
            Warning::BreakdownMismatch {
                line: line.to_string(),
            },
        ),
    }
}

fn parse_line(line: &str) -> Option<ErrorBreakdown> {
    let caps = BREAKDOWN_PATTERN.captures(line)?;
    let group = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u64>().ok());
    Some(ErrorBreakdown {
        connect: group(1)?,
        receive: group(2)?,
        length: group(3)?,
        exceptions: group(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_line_in_order() {
        let d = decompose(Some("   (Connect: 1, Receive: 2, Length: 3, Exceptions: 4)"));
        assert_eq!(
            d.value,
            ErrorBreakdown {
                connect: 1,
                receive: 2,
                length: 3,
                exceptions: 4,
            }
        );
        assert!(d.warning.is_none());
    }

    #[test]
    fn tolerates_irregular_spacing() {
        let d = decompose(Some("(Connect:0,Receive:   0, Length: 17,  Exceptions: 0)"));
        assert_eq!(d.value.length, 17);
        assert!(d.warning.is_none());
    }

    #[test]
    fn mismatch_defaults_to_zero_with_warning() {
        let d = decompose(Some("Write errors:           0"));
        assert_eq!(d.value, ErrorBreakdown::default());
        assert_eq!(
            d.warning,
            Some(Warning::BreakdownMismatch {
                line: "Write errors:           0".to_string()
            })
        );
    }

    #[test]
    fn reordered_counters_do_not_match() {
        let d = decompose(Some("(Receive: 2, Connect: 1, Length: 3, Exceptions: 4)"));
        assert_eq!(d.value, ErrorBreakdown::default());
        assert!(d.warning.is_some());
    }

    #[test]
    fn overflowing_counter_is_a_mismatch() {
        let d = decompose(Some(
            "(Connect: 99999999999999999999999, Receive: 0, Length: 0, Exceptions: 0)",
        ));
        assert_eq!(d.value, ErrorBreakdown::default());
        assert!(matches!(d.warning, Some(Warning::BreakdownMismatch { .. })));
    }

    #[test]
    fn missing_line_defaults_with_warning() {
        let d = decompose(None);
        assert_eq!(d.value, ErrorBreakdown::default());
        assert_eq!(d.warning, Some(Warning::BreakdownMissing));
    }

    #[test]
    fn warning_display_mentions_line() {
        let w = Warning::BreakdownMismatch {
            line: "junk".to_string(),
        };
        assert!(w.to_string().contains("\"junk\""));
    }
}
