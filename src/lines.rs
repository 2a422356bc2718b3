/// Forward-only line cursor over a report stream.
///
/// Lines are yielded one at a time with their line terminator removed.
/// There is no peek and no rewind: once a line is returned it is consumed.
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

pub struct LineSource<R> {
    reader: R,
    buf: String,
    line_number: u64,
    exhausted: bool,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line_number: 0,
            exhausted: false,
        }
    }

    /// Advance to the next line. Returns `Ok(None)` once the stream is exhausted.
    pub fn next_line(&mut self) -> std::io::Result<Option<&str>> {
        if self.exhausted {
            return Ok(None);
        }

        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            self.exhausted = true;
            return Ok(None);
        }
        self.line_number += 1;

        if self.buf.ends_with('\n') {
            self.buf.pop();
            if self.buf.ends_with('\r') {
                self.buf.pop();
            }
        }
        Ok(Some(&self.buf))
    }

    /// 1-based number of the last line returned (0 before the first read).
    pub fn line_number(&self) -> u64 {
        self.line_number
    }
}

impl LineSource<BufReader<Box<dyn Read>>> {
    /// Open a report file, or standard input when `path` is `-`.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let inner: Box<dyn Read> = if path == Path::new("-") {
            Box::new(std::io::stdin())
        } else {
            Box::new(std::fs::File::open(path)?)
        };
        Ok(Self::new(BufReader::new(inner)))
    }
}
