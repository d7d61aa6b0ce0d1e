//! Classification of a single raw argument.
//!
//! A self-contained option is acted on immediately; an option that still
//! needs its value is handed back to the driver together with the identifier
//! that asked for it.

use std::path::Path;

use tracing::trace;

use super::core::OptionParser;
use super::rules::{attached_value, leading_dashes, name_and_value, short_letter};
use super::state::ParseState;
use crate::error::{MalformedReason, OptionError, Result};
use crate::registry::{Identifier, Role};

/// What one argument turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Classification {
    /// An option that has been fully handled.
    Option,
    /// An option whose value is the next argument.
    OptionNeedsValue(Identifier),
    /// Not an option.
    Positional,
    /// `--`, when the terminator is enabled.
    Terminator,
}

/// A short option letter and whatever follows it in the same argument.
struct ShortOption<'s> {
    letter: char,
    /// Everything after the letter, if anything follows it.
    trailing: Option<&'s str>,
    /// The value carried by the argument, if it has one.
    value: Option<&'s str>,
}

impl OptionParser<'_> {
    pub(crate) fn classify(&mut self, arg: &str, state: &mut ParseState) -> Result<Classification> {
        if arg.len() < 2 || !arg.starts_with('-') {
            return Ok(Classification::Positional);
        }
        if self.config.allow_option_terminator && arg == "--" {
            return Ok(Classification::Terminator);
        }

        let Ok((body, dashes)) = leading_dashes(arg) else {
            return Ok(Classification::Positional);
        };
        let classification = match dashes {
            _ if body.is_empty() => Classification::Positional,
            1 => self.handle_short(arg, body, state)?,
            2 => self.handle_long(arg, body, state)?,
            _ => Classification::Positional,
        };
        trace!(arg, ?classification, "classified argument");
        Ok(classification)
    }

    fn split_short<'s>(&self, arg: &str, cluster: &'s str) -> Result<ShortOption<'s>> {
        if self.config.short_letter_stands_alone() {
            let (after, letter) = short_letter(cluster)
                .map_err(|_| OptionError::malformed(arg, MalformedReason::EmptyName))?;
            if after.is_empty() {
                return Ok(ShortOption {
                    letter,
                    trailing: None,
                    value: None,
                });
            }
            let value = attached_value(after).map(|(_, value)| value).ok();
            return Ok(ShortOption {
                letter,
                trailing: Some(after),
                value,
            });
        }

        let (name, value) = match name_and_value(cluster) {
            Ok((_, parts)) => parts,
            Err(_) => (cluster, None),
        };
        let mut letters = name.chars();
        match (letters.next(), letters.next()) {
            (None, _) => Err(OptionError::malformed(arg, MalformedReason::EmptyName)),
            (Some(_), Some(_)) => Err(OptionError::malformed(
                arg,
                MalformedReason::WrongDashCount,
            )),
            (Some(letter), None) => Ok(ShortOption {
                letter,
                trailing: value.map(|_| &cluster[name.len()..]),
                value,
            }),
        }
    }

    /// Handles `-x`, `-x=value`, and when enabled `-xvalue` and `-xyz`.
    fn handle_short(
        &mut self,
        arg: &str,
        body: &str,
        state: &mut ParseState,
    ) -> Result<Classification> {
        let mut cluster = body;
        loop {
            let short = self.split_short(arg, cluster)?;
            let Some(index) = self.registry.find_short(short.letter) else {
                return Err(OptionError::unknown(short.letter.to_string(), arg));
            };

            match self.registry.spec(index).role() {
                role @ (Role::Flag | Role::Help) => {
                    let combine = self.config.allow_short_option_combination;
                    if short.trailing.is_some() && !combine {
                        return Err(OptionError::malformed(arg, MalformedReason::UnexpectedValue));
                    }
                    self.run_flag(index, role)?;
                    match short.trailing {
                        Some(rest) if combine => cluster = rest,
                        _ => return Ok(Classification::Option),
                    }
                }
                Role::Value => {
                    let Some(value) = short.value else {
                        return Ok(Classification::OptionNeedsValue(Identifier::Short(
                            short.letter,
                        )));
                    };
                    let name = short.letter.to_string();
                    self.registry.invoke_value(index, &name, value)?;
                    return Ok(Classification::Option);
                }
                Role::ConfigFile => {
                    let Some(path) = short.value else {
                        return Ok(Classification::OptionNeedsValue(Identifier::Short(
                            short.letter,
                        )));
                    };
                    self.include_file(Path::new(path), state)?;
                    return Ok(Classification::Option);
                }
            }
        }
    }

    /// Handles `--name` and `--name=value`.
    fn handle_long(
        &mut self,
        arg: &str,
        body: &str,
        state: &mut ParseState,
    ) -> Result<Classification> {
        let (name, value) = match name_and_value(body) {
            Ok((_, parts)) => parts,
            Err(_) => (body, None),
        };

        let mut letters = name.chars();
        match (letters.next(), letters.next()) {
            (None, _) => return Err(OptionError::malformed(arg, MalformedReason::EmptyName)),
            (Some(_), None) => {
                return Err(OptionError::malformed(arg, MalformedReason::WrongDashCount));
            }
            _ => {}
        }

        let Some(index) = self.registry.find_long(name) else {
            return Err(OptionError::unknown(name, arg));
        };

        match self.registry.spec(index).role() {
            role @ (Role::Flag | Role::Help) => {
                if value.is_some() {
                    return Err(OptionError::malformed(arg, MalformedReason::UnexpectedValue));
                }
                self.run_flag(index, role)?;
            }
            Role::Value => match value {
                Some(value) => self.registry.invoke_value(index, name, value)?,
                None => {
                    return Ok(Classification::OptionNeedsValue(Identifier::Long(
                        name.to_string(),
                    )));
                }
            },
            Role::ConfigFile => match value {
                Some(path) => self.include_file(Path::new(path), state)?,
                None => {
                    return Ok(Classification::OptionNeedsValue(Identifier::Long(
                        name.to_string(),
                    )));
                }
            },
        }
        Ok(Classification::Option)
    }

    fn run_flag(&mut self, index: usize, role: Role) -> Result<()> {
        if role == Role::Help {
            self.print_usage();
            Ok(())
        } else {
            self.registry.invoke_flag(index)
        }
    }

    fn print_usage(&mut self) {
        println!("{}", self.usage());
        self.printed_usage = true;
        tracing::debug!("printed usage");
    }
}
