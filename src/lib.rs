// Core modules
pub mod error;
pub mod lexer;
pub mod parser;
pub mod registry;
mod usage;

// Re-export key types for public API
pub use error::{ErrorCategory, MalformedReason, OptionError, Result};
pub use lexer::{Position, Token, Tokenizer, tokenize};
pub use parser::{OptionParser, ParserConfig, ParserConfigBuilder, parse_with_config};
pub use registry::{Identifier, IntoIdentifiers, OptionHandle};

/// Splits `text` with shell-style quoting and parses it with `parser`.
///
/// This is the simplest way to run a parser over a line of configuration
/// text.
///
/// # Examples
///
/// ```
/// use clopts::{OptionParser, parse_line};
///
/// let mut level = 0u8;
/// {
///     let mut op = OptionParser::new();
///     op.add_store("level", &mut level, "Compression level.").unwrap();
///     let positionals = parse_line(&mut op, r#"--level 9 "my file.txt""#).unwrap();
///     assert_eq!(positionals, vec!["my file.txt"]);
/// }
/// assert_eq!(level, 9);
/// ```
pub fn parse_line(parser: &mut OptionParser<'_>, text: &str) -> Result<Vec<String>> {
    parser.parse_str(text)
}
