//! Usage text generation.
//!
//! Each registered option contributes one entry listing its names, the name
//! of its value if it takes one, and its description. No attempt is made to
//! reflow descriptions; embedded newlines are kept and indented.

use std::fmt::Write;

use crate::parser::ParserConfig;
use crate::registry::OptionSpec;

const CONTINUATION_INDENT: &str = "\n    ";

/// Builds the usage text from the base message and the registered options.
pub(crate) fn render<'s, 'a: 's>(
    base: Option<&str>,
    specs: impl Iterator<Item = &'s OptionSpec<'a>>,
    config: &ParserConfig,
) -> String {
    let mut text = String::new();
    if let Some(base) = base {
        text.push_str(base);
        text.push('\n');
    }

    for spec in specs {
        let names = spec
            .identifiers
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(text, " {names}");
        if let Some(value_name) = &spec.value_name {
            let _ = write!(text, " {}", underline(value_name, config.use_ansi_codes));
        }
        let _ = write!(text, ": {}", indent_description(&spec.description));
        if let Some(default) = &spec.default {
            let _ = write!(text, "{CONTINUATION_INDENT}(default: {default})");
        }
        text.push('\n');
    }

    if config.allow_option_terminator {
        text.push_str(" --: Treat all subsequent arguments as positional.\n");
    }
    text
}

fn underline(text: &str, use_ansi_codes: bool) -> String {
    if use_ansi_codes {
        format!("\x1B[4m{text}\x1B[24m")
    } else {
        text.to_string()
    }
}

fn indent_description(description: &str) -> String {
    description.replace('\n', CONTINUATION_INDENT)
}
