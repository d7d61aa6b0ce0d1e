//! Registered options and the identifiers that select them.
//!
//! Each [`OptionSpec`] owns one action and any number of synonymous
//! identifiers. The registry maps short and long identifiers to the spec
//! they belong to; an identifier can be registered only once.

use std::collections::HashMap;
use std::fmt;

use crate::error::{OptionError, Result};

/// Callback for options that take no value.
pub type FlagAction<'a> = Box<dyn FnMut() + 'a>;

/// Callback for options that take a value. Receives the raw text and the name
/// the option was invoked under.
pub type ValueAction<'a> = Box<dyn FnMut(&str, &str) -> Result<()> + 'a>;

/// A single option name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// Selected with one dash, e.g. `-f`.
    Short(char),
    /// Selected with two dashes, e.g. `--flag`.
    Long(String),
}

impl Identifier {
    /// Validates a name and decides whether it is short or long.
    pub fn parse(name: &str) -> Result<Self> {
        let reason = if name.is_empty() {
            Some("options may not be empty")
        } else if name.contains('=') {
            Some("options may not contain '='")
        } else if name.starts_with('-') {
            Some("options may not begin with '-'")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(OptionError::InvalidIdentifier {
                ident: name.to_string(),
                reason,
            });
        }

        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Ok(Identifier::Short(letter)),
            _ => Ok(Identifier::Long(name.to_string())),
        }
    }

    /// The name without any leading dashes.
    pub fn name(&self) -> String {
        match self {
            Identifier::Short(letter) => letter.to_string(),
            Identifier::Long(name) => name.clone(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Short(letter) => write!(f, "-{letter}"),
            Identifier::Long(name) => write!(f, "--{name}"),
        }
    }
}

/// Anything that can name one option or a set of synonyms.
pub trait IntoIdentifiers {
    fn into_identifiers(self) -> Vec<String>;
}

impl IntoIdentifiers for char {
    fn into_identifiers(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoIdentifiers for &str {
    fn into_identifiers(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoIdentifiers for String {
    fn into_identifiers(self) -> Vec<String> {
        vec![self]
    }
}

impl<const N: usize> IntoIdentifiers for [&str; N] {
    fn into_identifiers(self) -> Vec<String> {
        self.iter().map(|name| name.to_string()).collect()
    }
}

impl IntoIdentifiers for &[&str] {
    fn into_identifiers(self) -> Vec<String> {
        self.iter().map(|name| name.to_string()).collect()
    }
}

impl IntoIdentifiers for Vec<&str> {
    fn into_identifiers(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl IntoIdentifiers for Vec<String> {
    fn into_identifiers(self) -> Vec<String> {
        self
    }
}

/// What an option does when it is selected.
pub enum OptionKind<'a> {
    Flag(FlagAction<'a>),
    Value(ValueAction<'a>),
    /// Reads further arguments from the file named by the value.
    ConfigFile,
    /// Prints the usage summary.
    Help,
}

/// Copyable summary of an [`OptionKind`], used to dispatch without holding a
/// borrow of the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Flag,
    Value,
    ConfigFile,
    Help,
}

impl Role {
    pub fn takes_value(self) -> bool {
        matches!(self, Role::Value | Role::ConfigFile)
    }
}

impl OptionKind<'_> {
    pub fn role(&self) -> Role {
        match self {
            OptionKind::Flag(_) => Role::Flag,
            OptionKind::Value(_) => Role::Value,
            OptionKind::ConfigFile => Role::ConfigFile,
            OptionKind::Help => Role::Help,
        }
    }
}

impl fmt::Debug for OptionKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.role(), f)
    }
}

/// One logical option: its names, its action and how it is documented.
#[derive(Debug)]
pub struct OptionSpec<'a> {
    pub identifiers: Vec<Identifier>,
    pub kind: OptionKind<'a>,
    pub description: String,
    pub value_name: Option<String>,
    pub default: Option<String>,
}

impl OptionSpec<'_> {
    pub fn role(&self) -> Role {
        self.kind.role()
    }
}

/// Handle returned by registration, used to adjust how an option is documented.
#[derive(Debug)]
pub struct OptionHandle<'r, 'a> {
    spec: &'r mut OptionSpec<'a>,
}

impl OptionHandle<'_, '_> {
    /// Sets the name shown for the option's value in the usage text.
    pub fn value_name(self, name: impl Into<String>) -> Self {
        if self.spec.role().takes_value() {
            self.spec.value_name = Some(name.into());
        }
        self
    }

    /// Replaces the default shown in the usage text.
    pub fn default_text(self, text: impl Into<String>) -> Self {
        self.spec.default = Some(text.into());
        self
    }

    pub fn identifiers(&self) -> &[Identifier] {
        &self.spec.identifiers
    }
}

/// Lookup tables from identifiers to registered options.
#[derive(Debug, Default)]
pub struct Registry<'a> {
    specs: Vec<OptionSpec<'a>>,
    short: HashMap<char, usize>,
    long: HashMap<String, usize>,
}

impl<'a> Registry<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new option under every given name.
    ///
    /// All names are validated and checked for duplicates before any of them
    /// is inserted, so a failed registration leaves the registry unchanged.
    pub fn register(
        &mut self,
        names: Vec<String>,
        kind: OptionKind<'a>,
        description: String,
    ) -> Result<OptionHandle<'_, 'a>> {
        if names.is_empty() {
            return Err(OptionError::InvalidIdentifier {
                ident: String::new(),
                reason: "an option needs at least one name",
            });
        }

        let identifiers = names
            .iter()
            .map(|name| Identifier::parse(name))
            .collect::<Result<Vec<_>>>()?;

        for (index, identifier) in identifiers.iter().enumerate() {
            if self.contains(identifier) || identifiers[..index].contains(identifier) {
                return Err(OptionError::Duplicate {
                    ident: identifier.name(),
                });
            }
        }

        let index = self.insert(identifiers, kind, description);
        Ok(OptionHandle {
            spec: &mut self.specs[index],
        })
    }

    /// Registers `-h`, `-?`, `--help` and `--usage` as the built-in help
    /// option, skipping any name that is already taken.
    pub fn register_help(&mut self) {
        let identifiers = [
            Identifier::Short('h'),
            Identifier::Short('?'),
            Identifier::Long("help".to_string()),
            Identifier::Long("usage".to_string()),
        ]
        .into_iter()
        .filter(|identifier| !self.contains(identifier))
        .collect::<Vec<_>>();
        if identifiers.is_empty() {
            return;
        }
        self.insert(
            identifiers,
            OptionKind::Help,
            "Print usage information.".to_string(),
        );
    }

    /// Adds a validated option and indexes it under each identifier.
    fn insert(
        &mut self,
        identifiers: Vec<Identifier>,
        kind: OptionKind<'a>,
        description: String,
    ) -> usize {
        let index = self.specs.len();
        for identifier in &identifiers {
            match identifier {
                Identifier::Short(letter) => {
                    self.short.insert(*letter, index);
                }
                Identifier::Long(name) => {
                    self.long.insert(name.clone(), index);
                }
            }
        }

        let value_name = match kind.role() {
            Role::Value => Some("value".to_string()),
            Role::ConfigFile => Some("file".to_string()),
            Role::Flag | Role::Help => None,
        };
        self.specs.push(OptionSpec {
            identifiers,
            kind,
            description,
            value_name,
            default: None,
        });
        index
    }

    pub fn contains(&self, identifier: &Identifier) -> bool {
        self.find(identifier).is_some()
    }

    pub fn find(&self, identifier: &Identifier) -> Option<usize> {
        match identifier {
            Identifier::Short(letter) => self.find_short(*letter),
            Identifier::Long(name) => self.find_long(name),
        }
    }

    pub fn find_short(&self, letter: char) -> Option<usize> {
        self.short.get(&letter).copied()
    }

    pub fn find_long(&self, name: &str) -> Option<usize> {
        self.long.get(name).copied()
    }

    pub fn spec(&self, index: usize) -> &OptionSpec<'a> {
        &self.specs[index]
    }

    /// Runs the flag action of the option at `index`.
    pub fn invoke_flag(&mut self, index: usize) -> Result<()> {
        let spec = &mut self.specs[index];
        match &mut spec.kind {
            OptionKind::Flag(action) => {
                action();
                Ok(())
            }
            _ => Err(dispatch_error(&spec.identifiers)),
        }
    }

    /// Runs the value action of the option at `index`.
    pub fn invoke_value(&mut self, index: usize, name: &str, value: &str) -> Result<()> {
        let spec = &mut self.specs[index];
        match &mut spec.kind {
            OptionKind::Value(action) => action(value, name),
            _ => Err(dispatch_error(&spec.identifiers)),
        }
    }

    pub fn specs(&self) -> impl Iterator<Item = &OptionSpec<'a>> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

fn dispatch_error(identifiers: &[Identifier]) -> OptionError {
    OptionError::Internal {
        option: identifiers
            .first()
            .map(ToString::to_string)
            .unwrap_or_default(),
    }
}
