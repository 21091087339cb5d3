//! update-packages command - update dependencies, optionally inside Docker.

use std::sync::Arc;

use anyhow::{bail, Result};

use crate::cli::{ArgumentIndex, CliOption};
use crate::commands::{change_directory, source_path};
use crate::helper::{Helpable, DEFAULT_DOCKER_IMAGE};

/// Command aliases.
pub const KEYS: [&str; 2] = ["update-packages", "UPDATE_PACKAGES"];

/// The bare command definition.
pub fn command() -> CliOption {
    CliOption::new(&KEYS, "Update the package dependencies via 'cargo update'.")
        .usage("capstan update-packages [OPTIONS]")
}

fn linux_packages() -> CliOption {
    CliOption::new(
        &["-l", "--linux-packages", "UPDATE_PACKAGES_LINUX_PACKAGES"],
        "Update the Linux version of the packages inside Docker. Some packages \
         resolve differently on Linux than on the host platform.",
    )
    .requires_value()
    .default_value("false")
}

fn image_name() -> CliOption {
    CliOption::new(
        &["-i", "--image-name", "UPDATE_PACKAGES_DOCKER_IMAGE_NAME"],
        "The Docker image name to run the commands in.",
    )
    .requires_value()
    .default_value(DEFAULT_DOCKER_IMAGE)
}

/// The fully assembled command with its handler bound.
pub fn option<H: Helpable + 'static>(helper: Arc<H>) -> CliOption {
    command()
        .with_optional(vec![change_directory(), linux_packages(), image_name()])
        .with_action(Box::new(move |index| handle(helper.as_ref(), index)))
}

/// Read the resolved index and call the collaborator.
pub fn handle(helper: &dyn Helpable, index: &ArgumentIndex) -> Result<()> {
    let source = source_path(index);
    let linux = index.flag("-l");
    let Some(image) = index.first("-i") else {
        bail!("an image name was not provided (-i, --image-name)");
    };
    helper.update_packages(&source, linux, image)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::resolve;
    use crate::helper::mock::{HelperCall, MockHelper};
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn image_can_come_from_the_environment() {
        let helper = MockHelper::new();
        let command = option(Arc::new(helper.clone()));
        let env = HashMap::from([
            (
                "UPDATE_PACKAGES_DOCKER_IMAGE_NAME".to_string(),
                "rust:slim".to_string(),
            ),
            ("CAPSTAN_CHDIR".to_string(), "/tmp/project".to_string()),
        ]);
        let index = resolve::resolve(&command, &[], &env, None).unwrap();

        handle(&helper, &index).unwrap();

        assert_eq!(
            helper.calls(),
            vec![HelperCall::UpdatePackages {
                source: PathBuf::from("/tmp/project"),
                linux: false,
                image: "rust:slim".to_string(),
            }]
        );
    }
}
