use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, trace, warn};

use super::classify::Classification;
use super::core::OptionParser;
use super::state::ParseState;
use crate::error::{MalformedReason, OptionError, Result};
use crate::lexer::Tokenizer;
use crate::registry::{Identifier, Role};

impl OptionParser<'_> {
    /// Walks an argument sequence, acting on options and collecting
    /// positionals into `state`.
    pub(crate) fn drive<I>(&mut self, mut args: I, state: &mut ParseState) -> Result<()>
    where
        I: Iterator<Item = Result<String>>,
    {
        while let Some(arg) = args.next() {
            let arg = arg?;
            match self.classify(&arg, state)? {
                Classification::Option => {}
                Classification::Positional => state.push_positional(arg),
                Classification::OptionNeedsValue(identifier) => {
                    let Some(value) = args.next() else {
                        return Err(OptionError::MissingValue { arg });
                    };
                    self.apply_value(&identifier, &value?, state)?;
                }
                Classification::Terminator => {
                    for rest in args.by_ref() {
                        state.push_positional(rest?);
                    }
                    break;
                }
            }
        }
        Ok(())
    }

    /// Hands a separately supplied value to the option that asked for it.
    fn apply_value(
        &mut self,
        identifier: &Identifier,
        value: &str,
        state: &mut ParseState,
    ) -> Result<()> {
        let Some(index) = self.registry.find(identifier) else {
            return Err(OptionError::unknown(identifier.name(), identifier.to_string()));
        };
        match self.registry.spec(index).role() {
            Role::Value => self
                .registry
                .invoke_value(index, &identifier.name(), value),
            Role::ConfigFile => self.include_file(Path::new(value), state),
            Role::Flag | Role::Help => Err(OptionError::malformed(
                identifier.to_string(),
                MalformedReason::UnexpectedValue,
            )),
        }
    }

    /// Reads further arguments from the file at `path`.
    ///
    /// The path is on the file stack for exactly as long as its contents are
    /// being parsed, whether or not that parse succeeds.
    pub(crate) fn include_file(&mut self, path: &Path, state: &mut ParseState) -> Result<()> {
        if state.is_open(path) {
            let chain = state.chain_with(path);
            warn!(path = %path.display(), depth = state.depth(), "configuration file loop");
            return Err(OptionError::ConfigLoop { chain });
        }
        let limit = self.config.max_include_depth;
        if state.depth() >= limit {
            warn!(path = %path.display(), limit, "configuration files nested too deeply");
            return Err(OptionError::IncludeTooDeep {
                path: path.to_path_buf(),
                limit,
            });
        }

        let file = File::open(path).map_err(|source| OptionError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), depth = state.depth(), "reading configuration file");
        let tokens = Tokenizer::for_reader(BufReader::new(file)).map(|token| match token {
            Ok(token) => {
                trace!(token = token.text(), position = %token.position(), "configuration token");
                Ok(token.into_text())
            }
            Err(OptionError::Io { source }) => Err(OptionError::Unreadable {
                path: path.to_path_buf(),
                source,
            }),
            Err(other) => Err(other),
        });

        state.push_file(path.to_path_buf());
        let result = self.drive(tokens, state);
        state.pop_file();
        debug!(path = %path.display(), ok = result.is_ok(), "finished configuration file");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn failed_inclusion_pops_the_file_stack() {
        let dir = TempDir::new().unwrap();
        let outer = dir.path().join("outer.cfg");
        let bad = dir.path().join("bad.cfg");
        fs::write(&bad, "kept --nope\n").unwrap();

        let mut op = OptionParser::new();
        let mut state = ParseState::new();
        state.push_file(outer.clone());

        let error = op.include_file(&bad, &mut state).unwrap_err();
        assert!(matches!(error, OptionError::UnknownOption { ref option, .. } if option == "nope"));
        assert_eq!(state.depth(), 1);
        assert!(!state.is_open(&bad));
        assert!(state.is_open(&outer));

        // The same file can be included again from the same state.
        let error = op.include_file(&bad, &mut state).unwrap_err();
        assert!(matches!(error, OptionError::UnknownOption { .. }));
        assert_eq!(state.depth(), 1);
        assert_eq!(state.into_positionals(), vec!["kept", "kept"]);
    }

    #[test]
    fn unreadable_inclusion_leaves_the_stack_alone() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.cfg");

        let mut op = OptionParser::new();
        let mut state = ParseState::new();
        let error = op.include_file(&missing, &mut state).unwrap_err();
        assert!(matches!(error, OptionError::Unreadable { .. }));
        assert_eq!(state.depth(), 0);
    }
}
