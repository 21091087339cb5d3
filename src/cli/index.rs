//! cli::index
//!
//! The merged result of resolving every configuration source for one
//! command invocation.
//!
//! An [`ArgumentIndex`] is built fresh per `run` call and discarded after the
//! handler returns. Internally, values are keyed by [`OptionId`]; an explicit
//! alias table maps every key string of every option in the command's scope
//! to its id, so handlers can look a value up by any alias.

use std::collections::{BTreeMap, HashMap};

use crate::cli::error::CliError;
use crate::cli::option::{CliOption, OptionId};

/// Merged key-to-values mapping for a single invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentIndex {
    /// Any alias of any option in scope, mapped to the owning option.
    aliases: HashMap<String, OptionId>,
    /// Canonical (first) key per option, for snapshots and messages.
    canonical: BTreeMap<OptionId, String>,
    /// Resolved values. Present-with-empty means bare-flag presence.
    values: HashMap<OptionId, Vec<String>>,
}

impl ArgumentIndex {
    /// Build the alias table for a command and its sub-options.
    ///
    /// Fails when two options in the same scope share an alias; conflating
    /// them would silently route one option's values to the other.
    pub(crate) fn for_scope(command: &CliOption) -> Result<Self, CliError> {
        let mut aliases = HashMap::new();
        let mut canonical = BTreeMap::new();
        for option in std::iter::once(command).chain(command.arguments()) {
            canonical.insert(option.id(), option.canonical_key().to_string());
            for key in &option.keys {
                if aliases.insert(key.clone(), option.id()).is_some() {
                    return Err(CliError::DuplicateKey { key: key.clone() });
                }
            }
        }
        Ok(ArgumentIndex {
            aliases,
            canonical,
            values: HashMap::new(),
        })
    }

    /// All values resolved for `key`, looked up by any alias.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        let id = self.aliases.get(key)?;
        self.values.get(id).map(Vec::as_slice)
    }

    /// The first value resolved for `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|values| values.first()).map(String::as_str)
    }

    /// Boolean coercion for flags.
    ///
    /// Absent means `false`. Present with no value means `true` (bare `-x`,
    /// or a bare key in the config file). Otherwise the first value decides:
    /// `"true"` and `"1"` are truthy, anything else is not.
    pub fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            None => false,
            Some(values) => match values.first() {
                None => true,
                Some(value) => value == "true" || value == "1",
            },
        }
    }

    /// Whether any source resolved a value (or presence) for this option.
    pub(crate) fn is_set(&self, id: OptionId) -> bool {
        self.values.contains_key(&id)
    }

    /// Overwrite the values for an option. Later command-line occurrences of
    /// a scalar flag go through here, so last wins.
    pub(crate) fn set(&mut self, id: OptionId, values: Vec<String>) {
        self.values.insert(id, values);
    }

    /// Append one value, preserving order. Positional capture goes through
    /// here so multi-file lists survive intact.
    pub(crate) fn append(&mut self, id: OptionId, value: String) {
        self.values.entry(id).or_default().push(value);
    }

    /// Snapshot of the index keyed by canonical key, mainly for tests and
    /// debug output.
    pub fn to_map(&self) -> BTreeMap<String, Vec<String>> {
        self.canonical
            .iter()
            .filter_map(|(id, key)| {
                self.values.get(id).map(|values| (key.clone(), values.clone()))
            })
            .collect()
    }
}
