//! Translation of [`CompilerOptions`] into the transformer's argument list.
//!
//! The transformer's grammar is positional and order sensitive:
//!
//! ```text
//! <entry-point> [--relativize] [--follow-requires] [--source-charset <cs>]
//!     [--output-charset <cs>] [--target <ver>] [--strip-types]
//!     --extension <ext> <sourcePath> <targetPath> [<moduleId> ...]
//! ```

use std::fmt;

use crate::options::CompilerOptions;

pub const RELATIVIZE: &str = "--relativize";
pub const FOLLOW_REQUIRES: &str = "--follow-requires";
pub const SOURCE_CHARSET: &str = "--source-charset";
pub const OUTPUT_CHARSET: &str = "--output-charset";
pub const TARGET: &str = "--target";
pub const STRIP_TYPES: &str = "--strip-types";
pub const EXTENSION: &str = "--extension";

/// Ordered argument tokens; the first is the transformer entry point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    /// Build the command line. Values are passed through untouched.
    pub fn build(options: &CompilerOptions, entry_point: impl Into<String>) -> Self {
        let mut tokens = vec![entry_point.into()];

        if options.relative {
            tokens.push(RELATIVIZE.to_string());
        }

        if options.follow_requires {
            tokens.push(FOLLOW_REQUIRES.to_string());
        }

        let valued = [
            (SOURCE_CHARSET, &options.source_char_set),
            (OUTPUT_CHARSET, &options.target_char_set),
            (TARGET, &options.target_ecma_script_version),
        ];
        for (flag, value) in valued {
            if !value.is_empty() {
                tokens.push(flag.to_string());
                tokens.push(value.clone());
            }
        }

        if options.strip_annotation_types {
            tokens.push(STRIP_TYPES.to_string());
        }

        tokens.push(EXTENSION.to_string());
        tokens.push(options.extension.clone());

        tokens.push(options.source_path.clone());
        tokens.push(options.target_path.clone());
        tokens.extend(options.module_ids.iter().cloned());

        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn entry_point(&self) -> &str {
        &self.tokens[0]
    }

    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write_quoted(f, token)?;
        }
        Ok(())
    }
}

/// Shell-style rendering for logs: tokens with whitespace or quotes are
/// single-quoted, embedded single quotes are escaped.
fn write_quoted(f: &mut fmt::Formatter<'_>, token: &str) -> fmt::Result {
    let needs_quotes = token.is_empty()
        || token
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '\\' | '$' | '`'));

    if !needs_quotes {
        return f.write_str(token);
    }

    f.write_str("'")?;
    f.write_str(&token.replace('\'', r"'\''"))?;
    f.write_str("'")
}
