//! git-tag command - create or increment the repo's semver tag.

use std::sync::Arc;

use anyhow::{bail, Result};
use semver::Version;

use crate::cli::{ArgumentIndex, CliOption};
use crate::commands::{change_directory, source_path};
use crate::helper::{Helpable, HelperError, VersionComponent};
use crate::ui::output::{self, Verbosity};

/// Command aliases.
pub const KEYS: [&str; 2] = ["git-tag", "GIT_TAG"];

/// The bare command definition.
pub fn command() -> CliOption {
    CliOption::new(
        &KEYS,
        "Update your package's git repo's semantic versioned tag.",
    )
    .usage("capstan git-tag [OPTIONS]")
}

fn version() -> CliOption {
    CliOption::new(
        &["-v", "--version", "GIT_TAG_VERSION"],
        "Specify exactly what the version should be.",
    )
    .requires_value()
}

fn increment() -> CliOption {
    CliOption::new(
        &["-i", "--increment", "GIT_TAG_INCREMENT"],
        "Automatically increment a portion of the repo's tag. Valid values are \
         [major, minor, patch].",
    )
    .requires_value()
    .default_value("patch")
}

/// The fully assembled command with its handler bound.
pub fn option<H: Helpable + 'static>(helper: Arc<H>) -> CliOption {
    command()
        .with_optional(vec![change_directory(), version(), increment()])
        .with_action(Box::new(move |index| handle(helper.as_ref(), index)))
}

/// Read the resolved index and call the collaborator.
///
/// An explicit `-v` wins over `-i`; the increment default means a bare
/// `capstan git-tag` bumps the patch component.
pub fn handle(helper: &dyn Helpable, index: &ArgumentIndex) -> Result<()> {
    let source = source_path(index);
    if let Some(version) = index.first("-v") {
        let version = Version::parse(version).map_err(|_| HelperError::MalformedValue {
            value: version.to_string(),
            expected: "a semantic version (MAJOR.MINOR.PATCH)",
        })?;
        helper.git_tag(&source, &version)?;
        output::print(format!("tagged {}", version), Verbosity::Normal);
    } else if let Some(component) = index.first("-i") {
        let component: VersionComponent = component.parse()?;
        let tagged = helper.increment_git_tag(&source, component)?;
        output::print(format!("tagged {}", tagged), Verbosity::Normal);
    } else {
        bail!("you must provide either a version (-v, --version) or an increment component (-i, --increment)");
    }
    Ok(())
}
