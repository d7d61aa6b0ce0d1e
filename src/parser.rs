// Parser module: classification of single arguments, the driver that walks
// argument sequences, and the public OptionParser type
mod classify;
mod config;
mod core;
mod driver;
mod rules;
mod state;

#[cfg(test)]
mod tests;

pub use config::{ParserConfig, ParserConfigBuilder};
pub use self::core::OptionParser;

use crate::error::Result;

/// Parse arguments with a parser built from `config`, registering options
/// with `setup` first.
pub fn parse_with_config<'a, I, F>(config: ParserConfig, setup: F, args: I) -> Result<Vec<String>>
where
    F: FnOnce(&mut OptionParser<'a>) -> Result<()>,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut parser = OptionParser::with_config(config);
    setup(&mut parser)?;
    parser.parse_args(args)
}
