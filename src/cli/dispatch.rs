//! cli::dispatch
//!
//! Command selection, required-argument validation, and handler invocation.
//!
//! The dispatcher matches `argv[1]` against the root commands of the active
//! option groups, resolves the matched command's subtree, verifies every
//! required sub-argument resolved to a value, and only then invokes the
//! bound handler. A missing required argument never reaches the handler.

use std::collections::HashMap;

use toml::Table;

use crate::cli::error::CliError;
use crate::cli::option::{CliOption, CliOptionGroup};
use crate::cli::resolve;

/// Select and run the command named by `arguments[1]`.
///
/// Handler results (success or failure) propagate unchanged; the executable
/// decides the exit code.
pub fn dispatch(
    groups: &[CliOptionGroup],
    arguments: &[String],
    environment: &HashMap<String, String>,
    document: Option<&Table>,
) -> Result<(), CliError> {
    let token = arguments.get(1).ok_or(CliError::NoCommand)?;
    let command = find_command(groups, token).ok_or_else(|| CliError::UnknownCommand {
        name: token.clone(),
    })?;

    let rest = arguments.get(2..).unwrap_or(&[]);
    let index = resolve::resolve(command, rest, environment, document)?;

    let missing: Vec<String> = command
        .required_arguments
        .iter()
        .filter(|option| match index.get(option.canonical_key()) {
            None => true,
            Some(values) => option.requires_value && values.is_empty(),
        })
        .map(|option| option.keys.join("|"))
        .collect();
    if !missing.is_empty() {
        return Err(CliError::MissingRequiredArgument {
            keys: missing.join(", "),
        });
    }

    let action = command.action.as_ref().ok_or_else(|| CliError::NoActionBound {
        name: command.canonical_key().to_string(),
    })?;
    action(&index).map_err(CliError::Handler)
}

/// Match a token against every root command's aliases, first group first.
fn find_command<'a>(groups: &'a [CliOptionGroup], token: &str) -> Option<&'a CliOption> {
    groups
        .iter()
        .flat_map(|group| group.options.iter())
        .find(|option| option.matches(token))
}
