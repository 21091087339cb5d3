//! cli::option
//!
//! Declarative description of the CLI surface.
//!
//! A [`CliOption`] describes one command or flag: its aliases, its display
//! text, whether it consumes a value, and the sub-options that live under it.
//! Options carry no resolution logic; the resolver and dispatcher consume the
//! definition tree and never mutate it.
//!
//! # Identity
//!
//! Each option receives a generated [`OptionId`] at construction. Equality and
//! hashing go through the id, never through the key strings, so two unrelated
//! options that happen to share a key suffix can never be conflated in an
//! indexed collection. Alias-to-id tables are built per command scope by the
//! resolver, which also rejects duplicate aliases between siblings.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::cli::index::ArgumentIndex;

/// Stable identity for an option, assigned at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId(u64);

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

impl OptionId {
    fn next() -> Self {
        OptionId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handler bound to a root command option.
///
/// Invoked by the dispatcher with the fully resolved argument index after
/// required arguments have been validated.
pub type Action = Box<dyn Fn(&ArgumentIndex) -> anyhow::Result<()>>;

/// One flag or command.
///
/// `keys` is ordered: short flag, long flag, then the environment-variable
/// name (upper snake case). The first key is the canonical identifier; the
/// last key is the one consulted in the process environment. Commands use
/// their command word plus an upper-snake alias (`["build", "BUILD"]`).
pub struct CliOption {
    id: OptionId,
    /// Aliases for this option; at least one, lookups accept any of them.
    pub keys: Vec<String>,
    /// One-line description shown in help output.
    pub description: String,
    /// Usage text for commands; `None` for plain flags.
    pub usage: Option<String>,
    /// Whether the token following the flag is consumed as its value.
    pub requires_value: bool,
    /// Value used when no source supplies one.
    pub default_value: Option<String>,
    /// Sub-options that must resolve to a value.
    pub required_arguments: Vec<CliOption>,
    /// Sub-options that may resolve to a value.
    pub optional_arguments: Vec<CliOption>,
    /// Handler for root command options; `None` on flags.
    pub action: Option<Action>,
}

impl CliOption {
    /// Create an option with presence-only semantics and no default.
    ///
    /// Panics when `keys` is empty; that is a definition bug in the command
    /// table, not a user error.
    pub fn new(keys: &[&str], description: &str) -> Self {
        assert!(!keys.is_empty(), "an option needs at least one key");
        CliOption {
            id: OptionId::next(),
            keys: keys.iter().map(|k| k.to_string()).collect(),
            description: description.to_string(),
            usage: None,
            requires_value: false,
            default_value: None,
            required_arguments: Vec::new(),
            optional_arguments: Vec::new(),
            action: None,
        }
    }

    /// Set the usage line shown in help output.
    pub fn usage(mut self, usage: &str) -> Self {
        self.usage = Some(usage.to_string());
        self
    }

    /// Mark this option as consuming the token that follows it.
    pub fn requires_value(mut self) -> Self {
        self.requires_value = true;
        self
    }

    /// Declare the value used when no source supplies one.
    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    /// Attach sub-options that must resolve before dispatch.
    pub fn with_required(mut self, arguments: Vec<CliOption>) -> Self {
        self.required_arguments = arguments;
        self
    }

    /// Attach sub-options that may resolve.
    pub fn with_optional(mut self, arguments: Vec<CliOption>) -> Self {
        self.optional_arguments = arguments;
        self
    }

    /// Bind the handler invoked with the resolved index.
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// The generated stable identity.
    pub fn id(&self) -> OptionId {
        self.id
    }

    /// The first key; used when synthesizing output (config lookups, index
    /// snapshots, help listings).
    pub fn canonical_key(&self) -> &str {
        &self.keys[0]
    }

    /// The last key; consulted as the environment-variable name.
    pub fn env_key(&self) -> &str {
        self.keys.last().map(String::as_str).unwrap_or_default()
    }

    /// Whether `token` matches any of this option's aliases.
    pub fn matches(&self, token: &str) -> bool {
        self.keys.iter().any(|k| k == token)
    }

    /// All sub-options, required first.
    pub fn arguments(&self) -> impl Iterator<Item = &CliOption> {
        self.required_arguments
            .iter()
            .chain(self.optional_arguments.iter())
    }
}

impl PartialEq for CliOption {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CliOption {}

impl Hash for CliOption {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for CliOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliOption")
            .field("id", &self.id)
            .field("keys", &self.keys)
            .field("requires_value", &self.requires_value)
            .field("default_value", &self.default_value)
            .field("required_arguments", &self.required_arguments)
            .field("optional_arguments", &self.optional_arguments)
            .field("action", &self.action.as_ref().map(|_| "<action>"))
            .finish()
    }
}

/// A named collection of root commands shown together in help output.
#[derive(Debug)]
pub struct CliOptionGroup {
    /// Section header, e.g. `"Commands:"`.
    pub description: String,
    /// The root command options in display order.
    pub options: Vec<CliOption>,
}

impl CliOptionGroup {
    /// Create a group from a header and its commands.
    pub fn new(description: &str, options: Vec<CliOption>) -> Self {
        CliOptionGroup {
            description: description.to_string(),
            options,
        }
    }
}
