//! commands
//!
//! The command set and the composition root.
//!
//! Each submodule declares one command: its option definitions (keys,
//! defaults, env names) and the handler that reads the resolved index and
//! calls into the [`Helpable`](crate::helper::Helpable) seam. [`Capstan`]
//! assembles the full surface and implements
//! [`Runnable`](crate::cli::Runnable).
//!
//! Handlers are bound as closures over an `Arc` of the injected helper, so
//! the option groups can be rebuilt per run without the definitions holding
//! any application state.

pub mod archive;
pub mod build;
pub mod clean;
pub mod fetch;
pub mod tag;
pub mod update;
pub mod upload;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use toml::Table;

use crate::cli::{CliError, CliOption, CliOptionGroup, Runnable};
use crate::cli::{config, ArgumentIndex};
use crate::helper::Helpable;

/// Name of the per-directory config file.
pub const CONFIG_FILE_NAME: &str = ".capstan.toml";

/// Aliases of the shared working-directory option. The env-style key is
/// app-scoped rather than command-scoped because every command honors it.
pub const CHDIR_KEYS: [&str; 3] = ["-C", "--chdir", "CAPSTAN_CHDIR"];

/// The shared `-C/--chdir` option definition.
pub(crate) fn change_directory() -> CliOption {
    CliOption::new(&CHDIR_KEYS, "Change the current working directory.").requires_value()
}

/// The directory a command operates on: the resolved chdir value, else the
/// process working directory.
pub(crate) fn source_path(index: &ArgumentIndex) -> PathBuf {
    index
        .first(CHDIR_KEYS[0])
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Working directory named on the raw command line, if any.
///
/// Runs before resolution because the config file's own location depends on
/// this flag.
pub(crate) fn chdir_from_args(arguments: &[String]) -> Option<PathBuf> {
    arguments
        .iter()
        .position(|token| token == CHDIR_KEYS[0] || token == CHDIR_KEYS[1])
        .and_then(|position| arguments.get(position + 1))
        .map(PathBuf::from)
}

/// Working directory named in the environment, if any.
///
/// The exact app-scoped key wins; otherwise any key ending in `_CHDIR` is
/// accepted so command-scoped spellings keep working.
pub(crate) fn chdir_from_env(environment: &HashMap<String, String>) -> Option<PathBuf> {
    if let Some(value) = environment.get(CHDIR_KEYS[2]) {
        return Some(PathBuf::from(value));
    }
    environment
        .iter()
        .find(|(key, _)| key.ends_with("_CHDIR"))
        .map(|(_, value)| PathBuf::from(value))
}

/// The composition root: owns the injected helper and the full CLI surface.
pub struct Capstan<H: Helpable> {
    helper: Arc<H>,
}

impl<H: Helpable + 'static> Capstan<H> {
    /// Build the app around a collaborator implementation.
    pub fn new(helper: H) -> Self {
        Capstan {
            helper: Arc::new(helper),
        }
    }
}

impl<H: Helpable + 'static> Runnable for Capstan<H> {
    fn app_name(&self) -> &str {
        "capstan"
    }

    fn app_description(&self) -> Option<&str> {
        Some(
            "capstan keeps release chores off the command line. Build your package \
             in Linux through Docker, fetch and update dependencies, tar your \
             artifacts, upload them to S3, and bump the repo's semver tag.",
        )
    }

    fn app_usage(&self) -> Option<&str> {
        Some("capstan COMMAND [OPTIONS]")
    }

    fn option_groups(&self) -> Vec<CliOptionGroup> {
        let options = vec![
            fetch::option(self.helper.clone()),
            update::option(self.helper.clone()),
            build::option(self.helper.clone()),
            clean::option(self.helper.clone()),
            archive::option(self.helper.clone()),
            upload::option(self.helper.clone()),
            tag::option(self.helper.clone()),
        ];
        vec![CliOptionGroup::new("Commands:", options)]
    }

    fn config_document(
        &self,
        arguments: &[String],
        environment: &HashMap<String, String>,
    ) -> Result<Option<Table>, CliError> {
        let directory = chdir_from_args(arguments)
            .or_else(|| chdir_from_env(environment))
            .or_else(|| std::env::current_dir().ok());
        match directory {
            Some(directory) => config::load_document(&directory.join(CONFIG_FILE_NAME)),
            None => Ok(None),
        }
    }
}
