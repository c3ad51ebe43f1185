//! TLV scanner for the option area.
//!
//! ```text
//! +------+-----+-------------+
//! | code | len | payload ... |   code 0 (pad) and 255 (end) have no len/payload
//! +------+-----+-------------+
//! ```
//!
//! The scan stops at the first end marker; bytes after it are never looked
//! at. Running out of buffer between records is a normal end of stream,
//! since many clients omit the trailing marker. A record whose declared
//! length runs past the buffer is an error and ends the stream.

use std::iter::FusedIterator;

use crate::error::{Error, Result};
use crate::registry::{END, PAD};

/// One undecoded option record, borrowing its payload from the scanned buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawOption<'a> {
    pub code: u8,
    pub payload: &'a [u8],
}

/// Iterator over the option records of a buffer.
///
/// Yields `Ok` records in wire order, then either ends or yields a single
/// [`Error::TruncatedOption`] and ends. Each stream scans once; build a new
/// one to scan again.
#[derive(Debug, Clone)]
pub struct OptionStream<'a> {
    buffer: &'a [u8],
    cursor: usize,
    finished: bool,
    end_marker: bool,
}

impl<'a> OptionStream<'a> {
    /// Scans `buffer` from its first byte.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::at(buffer, 0)
    }

    /// Scans `buffer` starting at `offset`.
    pub fn at(buffer: &'a [u8], offset: usize) -> Self {
        Self {
            buffer,
            cursor: offset,
            finished: false,
            end_marker: false,
        }
    }

    /// Position of the next unread byte.
    pub fn offset(&self) -> usize {
        self.cursor
    }

    /// Whether the scan stopped on an explicit end marker.
    pub fn saw_end_marker(&self) -> bool {
        self.end_marker
    }

    fn fail(&mut self, code: u8, declared: usize, available: usize) -> Option<Result<RawOption<'a>>> {
        self.finished = true;
        Some(Err(Error::TruncatedOption {
            code,
            declared,
            available,
        }))
    }
}

impl<'a> Iterator for OptionStream<'a> {
    type Item = Result<RawOption<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let Some(&code) = self.buffer.get(self.cursor) else {
                self.finished = true;
                return None;
            };
            self.cursor += 1;

            match code {
                PAD => continue,
                END => {
                    self.finished = true;
                    self.end_marker = true;
                    return None;
                }
                _ => {}
            }

            let Some(&length) = self.buffer.get(self.cursor) else {
                return self.fail(code, 1, 0);
            };
            self.cursor += 1;

            let length = length as usize;
            let available = self.buffer.len() - self.cursor;
            if length > available {
                return self.fail(code, length, available);
            }

            let payload = &self.buffer[self.cursor..self.cursor + length];
            self.cursor += length;
            return Some(Ok(RawOption { code, payload }));
        }
    }
}

impl FusedIterator for OptionStream<'_> {}
