use std::io::BufRead;

use crate::error::Result;

/// Supplier of raw text for the tokenizer.
///
/// Sources hand out text in chunks so a reader never has to be drained up
/// front. Chunk boundaries must fall on grapheme boundaries; splitting after a
/// line feed is always safe.
pub trait CharSource {
    /// Returns the next chunk, or `None` once the source is exhausted.
    fn next_chunk(&mut self) -> Result<Option<String>>;
}

/// A source over an in-memory string, handed out as a single chunk.
#[derive(Debug, Clone)]
pub struct StrSource<'input> {
    remaining: Option<&'input str>,
}

impl<'input> StrSource<'input> {
    pub fn new(input: &'input str) -> Self {
        Self {
            remaining: Some(input),
        }
    }
}

impl CharSource for StrSource<'_> {
    fn next_chunk(&mut self) -> Result<Option<String>> {
        Ok(self.remaining.take().map(str::to_owned))
    }
}

/// A source that reads one line at a time from a buffered reader.
#[derive(Debug)]
pub struct ReaderSource<R: BufRead> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    fn next_chunk(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
