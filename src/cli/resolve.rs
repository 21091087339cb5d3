//! cli::resolve
//!
//! Multi-source argument resolution for a single command invocation.
//!
//! # Precedence
//!
//! Highest first: command-line tokens, environment variables, the config
//! file, then the default declared on the option. The command line is
//! special-cased because it is positional; the remaining sources are an
//! ordered list of [`Source`] implementations walked first-hit-wins for
//! every option the command line did not set. Adding a source means adding
//! an entry to that list, not touching the resolution loop.
//!
//! # Command-line scan
//!
//! Tokens after the command word are scanned left to right. Positional
//! tokens before the first recognized flag become the command's own values
//! (`create-archive ARCHIVE FILES...`). A token matching a sub-option alias
//! consumes the next token as its value when the option requires one, or
//! records bare presence otherwise. Repeated scalar flags overwrite earlier
//! occurrences; positional capture keeps everything in order.

use std::collections::HashMap;

use toml::{Table, Value};

use crate::cli::error::CliError;
use crate::cli::index::ArgumentIndex;
use crate::cli::option::CliOption;

/// One configuration source consulted for options argv did not set.
trait Source {
    /// The value(s) this source supplies for `option`, if any.
    fn lookup(&self, option: &CliOption) -> Option<Vec<String>>;
}

/// Process environment. An option's env-style key (its last key) supplies a
/// single value.
struct EnvSource<'a> {
    environment: &'a HashMap<String, String>,
}

impl Source for EnvSource<'_> {
    fn lookup(&self, option: &CliOption) -> Option<Vec<String>> {
        self.environment
            .get(option.env_key())
            .map(|value| vec![value.clone()])
    }
}

/// The command's table inside the config document. Keys are long flag names
/// without the leading dashes; a boolean `true` is a presence marker for
/// flags that take no value.
struct FileSource<'a> {
    table: Option<&'a Table>,
}

impl Source for FileSource<'_> {
    fn lookup(&self, option: &CliOption) -> Option<Vec<String>> {
        let table = self.table?;
        let value = option.keys.iter().find_map(|key| {
            let stripped = key.trim_start_matches('-');
            if stripped == key {
                // Not a dashed flag key; the file addresses flags only.
                return None;
            }
            table.get(stripped)
        })?;
        file_values(value, option.requires_value)
    }
}

/// Convert a TOML value into resolved values.
fn file_values(value: &Value, requires_value: bool) -> Option<Vec<String>> {
    match value {
        Value::String(s) => Some(vec![s.clone()]),
        Value::Boolean(true) if !requires_value => Some(Vec::new()),
        Value::Boolean(b) => Some(vec![b.to_string()]),
        Value::Integer(n) => Some(vec![n.to_string()]),
        Value::Float(n) => Some(vec![n.to_string()]),
        Value::Array(items) => {
            let strings: Vec<String> = items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect();
            if strings.is_empty() {
                None
            } else {
                Some(strings)
            }
        }
        _ => None,
    }
}

/// The default declared on the option definition.
struct DefaultSource;

impl Source for DefaultSource {
    fn lookup(&self, option: &CliOption) -> Option<Vec<String>> {
        option.default_value.clone().map(|value| vec![value])
    }
}

/// Resolve the argument index for `command`.
///
/// `arguments` are the argv tokens after the command word. `document` is the
/// full config document; the table matching the command's canonical key is
/// consulted. Resolution is a pure function of its inputs: the same
/// argv/env/file always produces the same index.
pub fn resolve(
    command: &CliOption,
    arguments: &[String],
    environment: &HashMap<String, String>,
    document: Option<&Table>,
) -> Result<ArgumentIndex, CliError> {
    let mut index = ArgumentIndex::for_scope(command)?;
    scan_command_line(command, arguments, &mut index)?;

    let table = document
        .and_then(|doc| doc.get(command.canonical_key()))
        .and_then(Value::as_table);
    let env = EnvSource { environment };
    let file = FileSource { table };
    let sources: [&dyn Source; 3] = [&env, &file, &DefaultSource];

    for option in std::iter::once(command).chain(command.arguments()) {
        if index.is_set(option.id()) {
            continue;
        }
        if let Some(values) = sources.iter().find_map(|source| source.lookup(option)) {
            index.set(option.id(), values);
        }
    }
    Ok(index)
}

/// Scan argv tokens into the index.
fn scan_command_line(
    command: &CliOption,
    arguments: &[String],
    index: &mut ArgumentIndex,
) -> Result<(), CliError> {
    let mut seen_flag = false;
    let mut i = 0;
    while i < arguments.len() {
        let token = &arguments[i];
        if let Some(option) = command.arguments().find(|o| o.matches(token)) {
            seen_flag = true;
            if option.requires_value {
                let value = arguments
                    .get(i + 1)
                    .ok_or_else(|| CliError::MissingValue { key: token.clone() })?;
                index.set(option.id(), vec![value.clone()]);
                i += 2;
            } else {
                index.set(option.id(), Vec::new());
                i += 1;
            }
        } else if !seen_flag {
            index.append(command.id(), token.clone());
            i += 1;
        } else {
            return Err(CliError::UnexpectedArgument {
                token: token.clone(),
            });
        }
    }
    Ok(())
}
