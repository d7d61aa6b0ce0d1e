/// Configuration for which option syntax the parser accepts.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Register `-h`, `-?`, `--help` and `--usage` to print the usage text
    pub automatic_help: bool,
    /// Allow `-xvalue` in addition to `-x=value`
    pub allow_short_value_without_equals: bool,
    /// Allow several short flags in one argument, as in `-xvf`
    pub allow_short_option_combination: bool,
    /// Treat `--` as the end of options
    pub allow_option_terminator: bool,
    /// Underline value names in the usage text with ANSI escape codes
    pub use_ansi_codes: bool,
    /// Maximum nesting depth of configuration files
    pub max_include_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            automatic_help: true,
            allow_short_value_without_equals: false,
            allow_short_option_combination: false,
            allow_option_terminator: false,
            use_ansi_codes: true,
            max_include_depth: 64,
        }
    }
}

impl ParserConfig {
    /// Creates a builder for configuring the parser.
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::new()
    }

    /// Whether anything may follow a short option letter without `=`.
    pub(crate) fn short_letter_stands_alone(&self) -> bool {
        self.allow_short_value_without_equals || self.allow_short_option_combination
    }
}

/// Builder for ParserConfig to provide a fluent configuration API.
#[derive(Debug, Default)]
pub struct ParserConfigBuilder {
    config: ParserConfig,
}

impl ParserConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn automatic_help(mut self, enabled: bool) -> Self {
        self.config.automatic_help = enabled;
        self
    }

    pub fn short_value_without_equals(mut self, allow: bool) -> Self {
        self.config.allow_short_value_without_equals = allow;
        self
    }

    pub fn short_option_combination(mut self, allow: bool) -> Self {
        self.config.allow_short_option_combination = allow;
        self
    }

    pub fn option_terminator(mut self, allow: bool) -> Self {
        self.config.allow_option_terminator = allow;
        self
    }

    pub fn ansi_codes(mut self, enabled: bool) -> Self {
        self.config.use_ansi_codes = enabled;
        self
    }

    /// Sets how many configuration files may be open at once.
    pub fn max_include_depth(mut self, depth: usize) -> Self {
        self.config.max_include_depth = depth;
        self
    }

    pub fn build(self) -> ParserConfig {
        self.config
    }
}
