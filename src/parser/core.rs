use std::fmt::{Debug, Display};
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use super::config::ParserConfig;
use super::state::ParseState;
use crate::error::{OptionError, Result};
use crate::lexer::{Token, Tokenizer};
use crate::registry::{IntoIdentifiers, OptionHandle, OptionKind, Registry};
use crate::usage;

/// Command line option parser.
///
/// Options are registered up front with one of three behaviours: a flag that
/// runs a callback, a value option that converts its argument and hands it
/// to a callback or stores it, or a configuration file option that reads
/// more arguments from a file. Parsing then maps an argument list onto those
/// options and returns the positional arguments in the order they appeared.
///
/// ```
/// use clopts::OptionParser;
///
/// let mut long_format = false;
/// let mut archive = String::new();
/// let positionals = {
///     let mut op = OptionParser::new();
///     op.add_flag(["l", "long"], || long_format = true, "List in long format.")
///         .unwrap();
///     op.add_store('f', &mut archive, "Archive file.").unwrap();
///     op.parse_args(["tar", "-l", "-f", "files.tar", "a.txt"]).unwrap()
/// };
///
/// assert!(long_format);
/// assert_eq!(archive, "files.tar");
/// assert_eq!(positionals, vec!["tar", "a.txt"]);
/// ```
pub struct OptionParser<'a> {
    pub(super) config: ParserConfig,
    pub(super) registry: Registry<'a>,
    pub(super) base_usage: Option<String>,
    pub(super) printed_usage: bool,
}

impl<'a> OptionParser<'a> {
    /// Creates a parser with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Creates a parser with the given configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        let mut parser = Self {
            config,
            registry: Registry::new(),
            base_usage: None,
            printed_usage: false,
        };

        if parser.config.automatic_help {
            parser.registry.register_help();
        }

        parser
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Adds an option which runs `action` each time it appears.
    pub fn add_flag(
        &mut self,
        idents: impl IntoIdentifiers,
        action: impl FnMut() + 'a,
        description: impl Into<String>,
    ) -> Result<OptionHandle<'_, 'a>> {
        self.registry.register(
            idents.into_identifiers(),
            OptionKind::Flag(Box::new(action)),
            description.into(),
        )
    }

    /// Adds an option whose value is converted to `T` and passed to `action`.
    pub fn add_value<T, F>(
        &mut self,
        idents: impl IntoIdentifiers,
        mut action: F,
        description: impl Into<String>,
    ) -> Result<OptionHandle<'_, 'a>>
    where
        T: FromStr,
        T::Err: Display,
        F: FnMut(T) + 'a,
    {
        let convert = move |raw: &str, name: &str| -> Result<()> {
            action(convert_value(raw, name)?);
            Ok(())
        };
        self.registry.register(
            idents.into_identifiers(),
            OptionKind::Value(Box::new(convert)),
            description.into(),
        )
    }

    /// Adds an option whose value is converted and written to `destination`.
    ///
    /// The destination's value at registration time is shown as the default in
    /// the usage text.
    pub fn add_store<T>(
        &mut self,
        idents: impl IntoIdentifiers,
        destination: &'a mut T,
        description: impl Into<String>,
    ) -> Result<OptionHandle<'_, 'a>>
    where
        T: FromStr + Debug,
        T::Err: Display,
    {
        let default = format!("{destination:?}");
        let store = move |raw: &str, name: &str| -> Result<()> {
            *destination = convert_value(raw, name)?;
            Ok(())
        };
        let handle = self.registry.register(
            idents.into_identifiers(),
            OptionKind::Value(Box::new(store)),
            description.into(),
        )?;
        Ok(handle.default_text(default))
    }

    /// Adds an option whose value names a file of further arguments.
    pub fn add_config_file(
        &mut self,
        idents: impl IntoIdentifiers,
        description: impl Into<String>,
    ) -> Result<OptionHandle<'_, 'a>> {
        self.registry.register(
            idents.into_identifiers(),
            OptionKind::ConfigFile,
            description.into(),
        )
    }

    /// Sets the text printed before the per-option usage lines.
    pub fn set_base_usage(&mut self, text: impl Into<String>) {
        self.base_usage = Some(text.into());
    }

    /// Returns the full usage text.
    pub fn usage(&self) -> String {
        usage::render(self.base_usage.as_deref(), self.registry.specs(), &self.config)
    }

    /// Whether one of the built-in help options printed the usage text.
    pub fn did_print_usage(&self) -> bool {
        self.printed_usage
    }

    pub fn allows_short_value_without_equals(&self) -> bool {
        self.config.allow_short_value_without_equals
    }

    /// Allows `-xvalue` as well as `-x=value`.
    pub fn set_allow_short_value_without_equals(&mut self, allow: bool) {
        self.config.allow_short_value_without_equals = allow;
    }

    pub fn allows_short_option_combination(&self) -> bool {
        self.config.allow_short_option_combination
    }

    /// Allows several short options in a single argument.
    pub fn set_allow_short_option_combination(&mut self, allow: bool) {
        self.config.allow_short_option_combination = allow;
    }

    pub fn allows_option_terminator(&self) -> bool {
        self.config.allow_option_terminator
    }

    /// Makes `--` end option parsing.
    pub fn set_allow_option_terminator(&mut self, allow: bool) {
        self.config.allow_option_terminator = allow;
    }

    pub fn uses_ansi_codes(&self) -> bool {
        self.config.use_ansi_codes
    }

    pub fn set_use_ansi_codes(&mut self, use_codes: bool) {
        self.config.use_ansi_codes = use_codes;
    }

    /// Parses a list of arguments, such as `std::env::args()`.
    ///
    /// Returns the positional arguments in the order they were encountered.
    /// The program name, if present, is returned as the first positional.
    pub fn parse_args<I>(&mut self, args: I) -> Result<Vec<String>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut state = ParseState::new();
        let args = args.into_iter().map(|arg| Ok(arg.as_ref().to_owned()));
        self.run(args, &mut state)?;
        Ok(state.into_positionals())
    }

    /// Parses the arguments of the current process.
    pub fn parse_env(&mut self) -> Result<Vec<String>> {
        self.parse_args(std::env::args())
    }

    /// Parses arguments from a string using shell-style splitting and quoting.
    pub fn parse_str(&mut self, text: &str) -> Result<Vec<String>> {
        let mut state = ParseState::new();
        let tokens = Tokenizer::for_str(text).map(|token| token.map(Token::into_text));
        self.run(tokens, &mut state)?;
        Ok(state.into_positionals())
    }

    /// Parses arguments from a reader using shell-style splitting and quoting.
    pub fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<Vec<String>> {
        let mut state = ParseState::new();
        let tokens = Tokenizer::for_reader(reader).map(|token| token.map(Token::into_text));
        self.run(tokens, &mut state)?;
        Ok(state.into_positionals())
    }

    /// Parses arguments from a file using shell-style splitting and quoting.
    ///
    /// The file counts as the outermost open configuration file, so an
    /// inclusion of it from within is reported as a loop.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<String>> {
        let mut state = ParseState::new();
        self.include_file(path.as_ref(), &mut state)?;
        Ok(state.into_positionals())
    }

    fn run<I>(&mut self, args: I, state: &mut ParseState) -> Result<()>
    where
        I: Iterator<Item = Result<String>>,
    {
        debug!("parsing arguments");
        self.drive(args, state)?;
        debug!(positionals = state.positional_count(), "parsing finished");
        Ok(())
    }
}

impl Default for OptionParser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for OptionParser<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionParser")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("printed_usage", &self.printed_usage)
            .finish()
    }
}

fn convert_value<T>(raw: &str, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse::<T>()
        .map_err(|cause| OptionError::conversion(raw, name, cause))
}
