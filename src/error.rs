/// Error handling module for option registration and parsing.
///
/// Every failure surfaces as an [`OptionError`]. Registration problems are
/// reported when an option is added; everything else aborts the parse call
/// that raised it, leaving earlier side effects in place.
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the option parser.
#[derive(Debug, Error)]
pub enum OptionError {
    /// An identifier that can never be matched by the parser.
    #[error("Invalid option name: '{ident}': {reason}")]
    InvalidIdentifier { ident: String, reason: &'static str },

    /// An identifier registered a second time.
    #[error("Attempt to redefine option '{ident}'")]
    Duplicate { ident: String },

    /// Option syntax naming something that was never registered.
    #[error("Unknown option: '{option}' in '{arg}'")]
    UnknownOption { option: String, arg: String },

    /// Option syntax that cannot be interpreted.
    #[error("Malformed option: '{arg}' ({reason})")]
    Malformed { arg: String, reason: MalformedReason },

    /// A value-consuming option with nothing left to consume.
    #[error("Missing value for '{arg}'")]
    MissingValue { arg: String },

    /// A value that could not be converted to the destination type. The
    /// conversion's own message is kept in `message`.
    #[error("Failed to parse \"{value}\" as argument to '{option}' option")]
    Conversion {
        value: String,
        option: String,
        message: String,
    },

    /// A configuration file that could not be opened or read.
    #[error("Unable to read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file that includes itself, directly or transitively.
    #[error("Configuration file loop: {}\nConfiguration parsing terminated", format_chain(chain))]
    ConfigLoop { chain: Vec<PathBuf> },

    /// A chain of nested configuration files deeper than the configured limit.
    #[error("Configuration files nested more than {limit} deep at {}", path.display())]
    IncludeTooDeep { path: PathBuf, limit: usize },

    /// An option dispatched to an action of the wrong kind.
    #[error("Internal logic error handling option: '{option}'")]
    Internal { option: String },

    /// I/O failure while reading a character stream.
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Why an option was considered malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    EmptyName,
    WrongDashCount,
    UnexpectedValue,
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            MalformedReason::EmptyName => "empty option name",
            MalformedReason::WrongDashCount => "wrong number of leading dashes",
            MalformedReason::UnexpectedValue => "no value expected for this flag",
        };
        f.write_str(text)
    }
}

/// Broad grouping of errors for callers that want more than the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Raised while registering options.
    Setup,
    /// Unknown, malformed or incomplete option syntax.
    Syntax,
    /// A value that failed conversion.
    Value,
    /// Configuration file inclusion failures.
    ConfigFile,
    /// Reading the argument stream failed.
    Io,
    /// A bug in the parser itself.
    Internal,
}

/// Convenience type alias for Results in the option parser.
pub type Result<T> = std::result::Result<T, OptionError>;

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|path| format!("\n  {}", path.display()))
        .collect()
}

impl OptionError {
    /// Creates a new malformed-option error.
    pub fn malformed(arg: impl Into<String>, reason: MalformedReason) -> Self {
        OptionError::Malformed {
            arg: arg.into(),
            reason,
        }
    }

    /// Creates a new unknown-option error.
    pub fn unknown(option: impl Into<String>, arg: impl Into<String>) -> Self {
        OptionError::UnknownOption {
            option: option.into(),
            arg: arg.into(),
        }
    }

    /// Creates a new conversion error from the raw text and the parse failure.
    pub fn conversion(
        value: impl Into<String>,
        option: impl Into<String>,
        cause: impl std::fmt::Display,
    ) -> Self {
        OptionError::Conversion {
            value: value.into(),
            option: option.into(),
            message: cause.to_string(),
        }
    }

    /// Returns the category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            OptionError::InvalidIdentifier { .. } | OptionError::Duplicate { .. } => {
                ErrorCategory::Setup
            }
            OptionError::UnknownOption { .. }
            | OptionError::Malformed { .. }
            | OptionError::MissingValue { .. } => ErrorCategory::Syntax,
            OptionError::Conversion { .. } => ErrorCategory::Value,
            OptionError::Unreadable { .. }
            | OptionError::ConfigLoop { .. }
            | OptionError::IncludeTooDeep { .. } => ErrorCategory::ConfigFile,
            OptionError::Io { .. } => ErrorCategory::Io,
            OptionError::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Returns true if this error was raised while registering options.
    pub fn is_setup_error(&self) -> bool {
        self.category() == ErrorCategory::Setup
    }

    /// Returns the option identifier involved, if the error names one.
    pub fn option(&self) -> Option<&str> {
        match self {
            OptionError::InvalidIdentifier { ident, .. } | OptionError::Duplicate { ident } => {
                Some(ident)
            }
            OptionError::UnknownOption { option, .. }
            | OptionError::Conversion { option, .. }
            | OptionError::Internal { option } => Some(option),
            _ => None,
        }
    }
}
