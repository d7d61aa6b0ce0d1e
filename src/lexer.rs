//! Shell-style tokenizer for argument streams and configuration files.
//!
//! Text is split on unquoted, unescaped whitespace. Single quotes keep
//! everything literally up to the closing quote. Double quotes keep whitespace
//! and single quotes, and a backslash inside them makes the next character
//! literal. Outside quotes a backslash makes the next character literal.
mod cursor;
mod position;
mod source;

pub use cursor::GraphemeCursor;
pub use position::Position;
pub use source::{CharSource, ReaderSource, StrSource};

use crate::error::Result;
use std::io::BufRead;
use tracing::trace;

/// One whitespace-delimited argument and where it began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub position: Position,
}

impl Token {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
}

/// Lazy, forward-only sequence of tokens over a [`CharSource`].
///
/// A tokenizer cannot be rewound; build a new one over a fresh source to
/// start again. Once it has returned `None` or an error it stays finished.
pub struct Tokenizer<S> {
    cursor: GraphemeCursor<S>,
    finished: bool,
}

impl<S: CharSource> Tokenizer<S> {
    pub fn new(source: S) -> Self {
        Self {
            cursor: GraphemeCursor::new(source),
            finished: false,
        }
    }

    /// Reads the next token, or `None` once the source is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        let mut text = String::new();
        let mut start: Option<Position> = None;
        let mut quote = Quote::None;
        let mut escaped = false;

        loop {
            let here = self.cursor.position();
            let Some(ch) = self.cursor.next_char()? else {
                break;
            };

            if escaped {
                escaped = false;
                start.get_or_insert(here);
                text.push(ch);
                continue;
            }

            match (quote, ch) {
                (Quote::Single, '\'') => quote = Quote::None,
                (Quote::Single, _) => text.push(ch),
                (_, '\\') => escaped = true,
                (Quote::Double, '"') => quote = Quote::None,
                (Quote::Double, _) => text.push(ch),
                (Quote::None, '\'') => quote = Quote::Single,
                (Quote::None, '"') => quote = Quote::Double,
                (Quote::None, _) if is_separator(ch) => {
                    if !text.is_empty() {
                        break;
                    }
                    start = None;
                    continue;
                }
                (Quote::None, _) => text.push(ch),
            }
            start.get_or_insert(here);
        }

        if quote != Quote::None {
            trace!(?quote, "input ended inside a quoted region");
        }

        if text.is_empty() {
            return Ok(None);
        }

        Ok(Some(Token {
            text,
            position: start.unwrap_or_default(),
        }))
    }
}

impl<'input> Tokenizer<StrSource<'input>> {
    /// Tokenizes an in-memory string.
    pub fn for_str(input: &'input str) -> Self {
        Self::new(StrSource::new(input))
    }
}

impl<R: BufRead> Tokenizer<ReaderSource<R>> {
    /// Tokenizes a buffered reader, one line at a time.
    pub fn for_reader(reader: R) -> Self {
        Self::new(ReaderSource::new(reader))
    }
}

impl<S: CharSource> Iterator for Tokenizer<S> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}

impl<S: CharSource> std::iter::FusedIterator for Tokenizer<S> {}

/// Space, tab, newline, vertical tab, form feed and carriage return.
fn is_separator(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Splits a string into tokens using shell-style quoting rules.
pub fn tokenize(input: &str) -> Result<Vec<String>> {
    Tokenizer::for_str(input)
        .map(|token| token.map(Token::into_text))
        .collect()
}
