//! cli
//!
//! The declarative option engine.
//!
//! # Responsibilities
//!
//! - Describe commands and flags declaratively ([`option`])
//! - Merge command-line tokens, environment variables, and the config file
//!   into one index per invocation ([`resolve`], [`index`])
//! - Select the command, validate required arguments, invoke the bound
//!   handler ([`dispatch`])
//!
//! # Architecture
//!
//! This layer knows nothing about any particular command. An application
//! implements [`Runnable`] to supply its option groups (and, optionally, a
//! config document); `run` does the rest. Execution is single-threaded and
//! command-to-completion: one invocation resolves one command and calls one
//! handler.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod help;
pub mod index;
pub mod option;
pub mod resolve;

pub use error::CliError;
pub use index::ArgumentIndex;
pub use option::{Action, CliOption, CliOptionGroup, OptionId};

use std::collections::HashMap;

use toml::Table;

/// An application runnable from a process argument list.
///
/// The option groups are requested per `run` call so that implementations
/// can bind actions to freshly captured state (typically an `Arc` of the
/// injected collaborator implementation). No state survives between calls;
/// in practice a process performs exactly one `run`.
pub trait Runnable {
    /// The executable's name, used as the fallback usage line.
    fn app_name(&self) -> &str;

    /// One-paragraph description for the help screen.
    fn app_description(&self) -> Option<&str> {
        None
    }

    /// Usage line for the help screen.
    fn app_usage(&self) -> Option<&str> {
        None
    }

    /// The full CLI surface.
    fn option_groups(&self) -> Vec<CliOptionGroup>;

    /// The config document for this invocation, if the application has one.
    ///
    /// Receives the raw arguments and environment because the document's
    /// location may itself be controlled by a flag or variable.
    fn config_document(
        &self,
        _arguments: &[String],
        _environment: &HashMap<String, String>,
    ) -> Result<Option<Table>, CliError> {
        Ok(None)
    }

    /// Entry point called once from `main`.
    ///
    /// Renders help when no command (or a help token) is given, prints the
    /// version for `--version`, and otherwise dispatches.
    fn run(
        &self,
        arguments: &[String],
        environment: &HashMap<String, String>,
    ) -> Result<(), CliError> {
        let groups = self.option_groups();
        match arguments.get(1).map(String::as_str) {
            None | Some("help") | Some("-h") | Some("--help") => {
                print!(
                    "{}",
                    help::render(
                        self.app_name(),
                        self.app_description(),
                        self.app_usage(),
                        &groups
                    )
                );
                return Ok(());
            }
            Some("version") | Some("--version") => {
                println!("{} {}", self.app_name(), env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            Some(_) => {}
        }
        let document = self.config_document(arguments, environment)?;
        dispatch::dispatch(&groups, arguments, environment, document.as_ref())
    }
}
