use std::path::{Path, PathBuf};

/// Mutable state threaded through one top-level parse call.
///
/// The file stack holds only the chain of configuration files currently
/// being read, outermost first.
#[derive(Debug, Default)]
pub(crate) struct ParseState {
    positionals: Vec<String>,
    file_stack: Vec<PathBuf>,
}

impl ParseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_positional(&mut self, arg: String) {
        self.positionals.push(arg);
    }

    pub fn positional_count(&self) -> usize {
        self.positionals.len()
    }

    /// Returns true if `path` is already open further up the chain.
    pub fn is_open(&self, path: &Path) -> bool {
        self.file_stack.iter().any(|open| open == path)
    }

    /// The open chain followed by `path`, for reporting inclusion loops.
    pub fn chain_with(&self, path: &Path) -> Vec<PathBuf> {
        let mut chain = self.file_stack.clone();
        chain.push(path.to_path_buf());
        chain
    }

    pub fn depth(&self) -> usize {
        self.file_stack.len()
    }

    pub fn push_file(&mut self, path: PathBuf) {
        self.file_stack.push(path);
    }

    pub fn pop_file(&mut self) {
        self.file_stack.pop();
    }

    pub fn into_positionals(self) -> Vec<String> {
        self.positionals
    }
}
