use super::position::Position;
use super::source::CharSource;
use crate::error::Result;
use unicode_segmentation::UnicodeSegmentation;

/// Forward-only cursor over the characters of a [`CharSource`].
///
/// The cursor holds at most one chunk of input at a time and pulls the next
/// chunk only when the current one is used up. Characters are handed out one
/// at a time, but line and column tracking is done per grapheme cluster so
/// that a base character and its combining marks count as one column.
pub struct GraphemeCursor<S> {
    source: S,
    chunk: String,
    offset: usize,
    /// The grapheme cluster currently being handed out.
    cluster: String,
    cluster_offset: usize,
    /// Where `cluster` began.
    cluster_start: Position,
    /// Position just past `cluster`.
    position: Position,
}

impl<S: CharSource> GraphemeCursor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            chunk: String::new(),
            offset: 0,
            cluster: String::new(),
            cluster_offset: 0,
            cluster_start: Position::new(),
            position: Position::new(),
        }
    }

    /// Returns the position of the next character to be read.
    ///
    /// Characters inside one grapheme cluster share its line and column; the
    /// byte offset is always exact.
    pub fn position(&self) -> Position {
        if self.cluster_offset < self.cluster.len() {
            Position {
                offset: self.cluster_start.offset + self.cluster_offset,
                ..self.cluster_start
            }
        } else {
            self.position
        }
    }

    /// Consumes and returns the next character.
    pub fn next_char(&mut self) -> Result<Option<char>> {
        loop {
            if let Some(ch) = self.cluster[self.cluster_offset..].chars().next() {
                self.cluster_offset += ch.len_utf8();
                return Ok(Some(ch));
            }
            if !self.next_cluster()? {
                return Ok(None);
            }
        }
    }

    /// Loads the next grapheme cluster, returning false at end of input.
    fn next_cluster(&mut self) -> Result<bool> {
        loop {
            if let Some(grapheme) = self.chunk[self.offset..].graphemes(true).next() {
                self.offset += grapheme.len();
                self.cluster.clear();
                self.cluster.push_str(grapheme);
                self.cluster_offset = 0;
                self.cluster_start = self.position;
                self.position.advance(&self.cluster);
                return Ok(true);
            }

            match self.source.next_chunk()? {
                Some(chunk) => {
                    self.chunk = chunk;
                    self.offset = 0;
                }
                None => return Ok(false),
            }
        }
    }
}
