/// Represents where a token starts in its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Moves past one grapheme cluster.
    pub(crate) fn advance(&mut self, grapheme: &str) {
        if matches!(grapheme, "\n" | "\r" | "\r\n") {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.offset += grapheme.len();
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
