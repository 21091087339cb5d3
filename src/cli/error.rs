//! cli::error
//!
//! Structured errors from the option engine.
//!
//! Every failure path in resolution and dispatch produces one of these
//! variants with an actionable message. Nothing is retried; the executable
//! prints the message and exits non-zero. Handler failures pass through
//! unchanged so the caller can inspect the underlying error (e.g. to adopt a
//! subprocess exit code).

use std::path::PathBuf;

use thiserror::Error;

/// Errors from resolution and dispatch.
#[derive(Debug, Error)]
pub enum CliError {
    /// The first positional token matched no known command.
    #[error("unknown command: {name}")]
    UnknownCommand {
        /// The token that was not recognized
        name: String,
    },

    /// No command token was supplied at all.
    #[error("no command provided")]
    NoCommand,

    /// A required sub-argument had no value from any source.
    #[error("required argument(s) not provided: {keys}")]
    MissingRequiredArgument {
        /// The aliases of the missing option(s)
        keys: String,
    },

    /// A value-taking flag was the last token on the command line.
    #[error("option {key} requires a value")]
    MissingValue {
        /// The flag that was left without a value
        key: String,
    },

    /// A token after the flag section matched nothing in scope.
    #[error("unexpected argument: {token}")]
    UnexpectedArgument {
        /// The unmatched token
        token: String,
    },

    /// Two options in one command's scope share an alias.
    #[error("duplicate option key in scope: {key}")]
    DuplicateKey {
        /// The colliding alias
        key: String,
    },

    /// A command option was registered without a bound handler.
    #[error("no handler bound for command: {name}")]
    NoActionBound {
        /// The command's canonical key
        name: String,
    },

    /// The config file exists but could not be read or parsed.
    #[error("malformed config file {path}: {message}")]
    Config {
        /// Path of the offending file
        path: PathBuf,
        /// Read or parse failure detail
        message: String,
    },

    /// The bound handler failed; propagated unchanged.
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}
